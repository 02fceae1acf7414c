//! The exploration engine: cursor descent, mutation scheduling, and
//! the restart decision.
//!
//! This module is the direct port of the original's
//! `_branch_start`/`_branch_end`/`branch_try_mutate`/`branches_restart`
//! quartet. The state machine is unchanged; only the storage (arena
//! indices instead of pointers) and the non-local exit (panics instead
//! of `longjmp`) differ.

use crate::error::{fail, BranchError, SourceLocation};
use crate::tree::{Arena, Branch, BranchId, TwigId, TwigState};

/// What a run's conclusion means for the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RestartCode {
    /// Every combination has been exercised; stop.
    Complete,
    /// At least one branch still has unvisited twigs; run again.
    Restart,
}

/// All of the per-run bookkeeping the original keeps in its single
/// `global_branch_information` static, now owned per thread-local
/// instance instead.
#[derive(Debug)]
pub(crate) struct Engine {
    arena: Arena,
    current_branch: Option<BranchId>,
    current_twig: TwigId,
    nesting_level: u32,
    prev_mutate_subbranch: Option<BranchId>,
    prev_mutate_nesting: u32,
    next_mutate_subbranch: Option<BranchId>,
    next_mutate_nesting: u32,
}

impl Engine {
    pub fn new() -> Self {
        let arena = Arena::new();
        let trunk = arena.trunk;
        Self {
            arena,
            current_branch: None,
            current_twig: trunk,
            nesting_level: 0,
            prev_mutate_subbranch: None,
            prev_mutate_nesting: 0,
            next_mutate_subbranch: None,
            next_mutate_nesting: 0,
        }
    }

    /// `_branch_start`.
    pub fn branch_start(
        &mut self,
        name: &'static str,
        num_twigs: u32,
        twig_names: Option<&'static [&'static str]>,
        loc: SourceLocation,
    ) -> u32 {
        // The num_twigs precondition is checked by the caller
        // (`api::branch_start_count_at`) before the engine is even
        // reached, so that it is reported ahead of `OutsideTest` when
        // both apply — matching the original, which checks arity
        // before the enabled flag in one function.
        debug_assert!(num_twigs >= 2, "caller must reject num_twigs < 2 before calling in");

        let value = match self.arena.twig(self.current_twig).state {
            TwigState::Uninitialized => self.discover_branch(name, num_twigs, twig_names, loc),
            TwigState::Discovered => self.revisit_branch(name, num_twigs, loc),
        };

        self.nesting_level += 1;
        value
    }

    fn discover_branch(
        &mut self,
        name: &'static str,
        num_twigs: u32,
        twig_names: Option<&'static [&'static str]>,
        loc: SourceLocation,
    ) -> u32 {
        let parent_twig = self.current_twig;
        let branch_id = self
            .arena
            .new_branch(name, loc.file, loc.line, loc.function, num_twigs, twig_names, parent_twig);

        self.arena.twig_mut(parent_twig).subbranches.push(branch_id);
        match self.arena.twig_mut(parent_twig).subbranches.advance() {
            crate::sibling_list::Advance::Landed(landed) if landed == branch_id => {}
            _ => unreachable!("the branch just pushed is always the next cursor position"),
        }

        self.current_branch = Some(branch_id);
        self.current_twig = self.arena.branch(branch_id).twigs[0];
        0
    }

    fn revisit_branch(&mut self, name: &'static str, num_twigs: u32, loc: SourceLocation) -> u32 {
        let parent_twig = self.current_twig;
        let prev_sibling_name = self
            .arena
            .twig(parent_twig)
            .subbranches
            .cursor_value()
            .map(|id| self.arena.branch(id).name)
            .unwrap_or("<null>");

        let branch_id = match self.arena.twig_mut(parent_twig).subbranches.advance() {
            crate::sibling_list::Advance::WrappedToHead => fail(BranchError::TooManySubbranches {
                location: loc,
                parent_name: prev_sibling_name.to_string(),
            }),
            crate::sibling_list::Advance::Landed(id) => id,
        };

        let branch = self.arena.branch(branch_id);
        if branch.parent_twig != parent_twig {
            fail(BranchError::ImpossibleTwigState {
                location: loc,
                name: branch.name.to_string(),
            });
        }
        if !structurally_matches(branch, name, num_twigs, loc) {
            fail(BranchError::StructureMismatch {
                location: loc,
                expected_name: branch.name.to_string(),
            });
        }

        self.current_branch = Some(branch_id);
        self.try_mutate(branch_id);

        let idx = self.arena.branch(branch_id).current_twig_idx;
        let twig = self.arena.branch(branch_id).twigs[idx as usize];
        self.current_twig = twig;
        self.arena.twig(twig).value
    }

    /// `branch_try_mutate`.
    fn try_mutate(&mut self, branch_id: BranchId) {
        if self.prev_mutate_subbranch == Some(branch_id) {
            self.arena.branch_mut(branch_id).current_twig_idx += 1;
            self.prev_mutate_subbranch = None;
            log::trace!("mutated branch {:?} to twig {}", branch_id, self.arena.branch(branch_id).current_twig_idx);
        } else if self.nesting_level > self.prev_mutate_nesting
            || (self.nesting_level + 1 == self.prev_mutate_nesting && self.prev_mutate_subbranch.is_none())
        {
            self.arena.branch_mut(branch_id).current_twig_idx = 0;
            log::trace!("reset branch {:?} to twig 0 (fresh descent)", branch_id);
        }
    }

    /// `_branch_end`.
    pub fn branch_end(&mut self, name: &'static str, loc: SourceLocation) {
        let current_branch_id = match self.current_branch {
            Some(b) => b,
            None => fail(BranchError::NoOpenBranch {
                location: loc,
                name: name.to_string(),
            }),
        };

        let branch_name = self.arena.branch(current_branch_id).name;
        if name != branch_name {
            fail(BranchError::NameMismatch {
                location: loc,
                name: name.to_string(),
                expected: branch_name.to_string(),
            });
        }

        let parent_twig = self.arena.branch(current_branch_id).parent_twig;
        if self.arena.twig(parent_twig).subbranches.cursor_value() != Some(current_branch_id) {
            fail(BranchError::UnbalancedBranchEnds {
                location: loc,
                name: name.to_string(),
                recorded: branch_name.to_string(),
            });
        }

        if self.arena.twig(self.current_twig).state == TwigState::Uninitialized {
            self.arena.twig_mut(self.current_twig).state = TwigState::Discovered;
        }

        let branch = self.arena.branch(current_branch_id);
        if branch.current_twig_idx + 1 < branch.num_twigs && self.next_mutate_nesting <= self.nesting_level {
            self.next_mutate_subbranch = Some(current_branch_id);
            self.next_mutate_nesting = self.nesting_level;
            log::trace!(
                "scheduled next-run mutation: branch={current_branch_id:?} nesting={}",
                self.next_mutate_nesting
            );
        }

        self.arena.twig_mut(self.current_twig).subbranches.reset_cursor();

        self.current_twig = parent_twig;
        self.current_branch = self.arena.twig(parent_twig).parent_branch;
        self.nesting_level -= 1;
    }

    /// `branches_restart`.
    pub fn restart(&mut self) -> RestartCode {
        let trunk = self.arena.trunk;
        if self.current_twig != trunk || self.nesting_level != 0 {
            fail(BranchError::TopLevelImbalance);
        }
        if !self.arena.twig(trunk).subbranches.would_wrap_on_next_advance() {
            fail(BranchError::TopLevelCountChanged);
        }

        if self.arena.twig(trunk).state == TwigState::Uninitialized {
            self.arena.twig_mut(trunk).state = TwigState::Discovered;
        }

        self.prev_mutate_subbranch = self.next_mutate_subbranch.take();
        self.prev_mutate_nesting = self.next_mutate_nesting;
        self.next_mutate_nesting = 0;

        self.arena.twig_mut(trunk).subbranches.reset_cursor();
        // Mirrors the original literally: current_branch is read back
        // off the (now reset) cursor, which is NULL at this point. The
        // next branch_start call always overwrites it before it is
        // read for anything meaningful.
        self.current_branch = None;

        let code = if self.prev_mutate_subbranch.is_some() {
            RestartCode::Restart
        } else {
            RestartCode::Complete
        };
        log::debug!("restart decision: {code:?}");
        code
    }

    /// `branch_print_current_path`.
    pub fn print_current_path(&self) {
        let mut path = Vec::new();
        let mut twig = self.current_twig;
        while let Some(owning_branch) = self.arena.twig(twig).parent_branch {
            path.push(twig);
            twig = self.arena.branch(owning_branch).parent_twig;
        }
        path.reverse();

        eprintln!();
        for (nesting, &path_twig) in path.iter().enumerate() {
            let owning_branch = self
                .arena
                .twig(path_twig)
                .parent_branch
                .expect("non-trunk twig always has an owning branch");
            let enclosing_twig = self.arena.branch(owning_branch).parent_twig;

            for sibling_id in self.arena.twig(enclosing_twig).subbranches.iter() {
                if sibling_id == owning_branch {
                    break;
                }
                let sibling = self.arena.branch(sibling_id);
                let selected = sibling.twigs[sibling.current_twig_idx as usize];
                self.print_twig_name(selected, nesting);
            }
            self.print_twig_name(path_twig, nesting);
        }
    }

    fn print_twig_name(&self, twig_id: TwigId, nesting: usize) {
        let indent = "  ".repeat(nesting);
        let twig = self.arena.twig(twig_id);
        match twig.parent_branch {
            Some(branch_id) => {
                let branch = self.arena.branch(branch_id);
                match branch.twig_names {
                    Some(names) => eprintln!(
                        "{indent}- {} ({}, {})",
                        branch.name, names[twig.value as usize], twig.value
                    ),
                    None => eprintln!("{indent}- {} ({})", branch.name, twig.value),
                }
            }
            None => eprintln!("{indent}- ????"),
        }
    }
}

fn structurally_matches(branch: &Branch, name: &'static str, num_twigs: u32, loc: SourceLocation) -> bool {
    std::ptr::eq(name, branch.name)
        && branch.num_twigs == num_twigs
        && branch.file == loc.file
        && branch.line == loc.line
        && branch.function_name == loc.function
}

#[cfg(test)]
mod test {
    use super::*;

    fn loc(line: u32) -> SourceLocation {
        SourceLocation::new("e.rs", line, "f")
    }

    #[test]
    fn single_branch_enumerates_every_value_then_completes() {
        let mut engine = Engine::new();
        let name = "only";
        let mut seen = Vec::new();
        loop {
            let v = engine.branch_start(name, 3, None, loc(1));
            seen.push(v);
            engine.branch_end(name, loc(2));
            if engine.restart() == RestartCode::Complete {
                break;
            }
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn nested_branches_enumerate_full_cross_product() {
        let mut engine = Engine::new();
        let outer = "outer";
        let inner = "inner";
        let mut combos = Vec::new();
        loop {
            let o = engine.branch_start(outer, 2, None, loc(1));
            let i = engine.branch_start(inner, 2, None, loc(2));
            combos.push((o, i));
            engine.branch_end(inner, loc(3));
            engine.branch_end(outer, loc(4));
            if engine.restart() == RestartCode::Complete {
                break;
            }
        }
        combos.sort();
        assert_eq!(combos, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
