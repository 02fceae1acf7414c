//! The Branch/Twig tree.
//!
//! Branches and twigs are arena-allocated: both live in flat `Vec`s
//! owned by [`Arena`] and are referenced by [`BranchId`]/[`TwigId`]
//! index newtypes rather than pointers. A parent edge is just the
//! parent's id stored on the child, so there is nothing to free by
//! hand — dropping the `Arena` drops everything it owns.

use crate::sibling_list::SiblingList;

/// Index of a [`Branch`] inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BranchId(usize);

/// Index of a [`Twig`] inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TwigId(usize);

/// Whether a twig has completed at least one full run to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TwigState {
    Uninitialized,
    Discovered,
}

/// A branch point: one call to `branch_start`/`branch_start_count`.
#[derive(Debug)]
pub(crate) struct Branch {
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub function_name: &'static str,
    pub num_twigs: u32,
    pub twig_names: Option<&'static [&'static str]>,
    /// The twig this branch was discovered under.
    pub parent_twig: TwigId,
    /// One twig per selectable value, `twigs[v].value == v`.
    pub twigs: Vec<TwigId>,
    /// Which twig is selected on the run currently in progress.
    pub current_twig_idx: u32,
}

/// One arm of a [`Branch`]: a single selectable value, plus whatever
/// sub-branches get discovered underneath it across runs.
#[derive(Debug)]
pub(crate) struct Twig {
    /// Meaningless for the trunk twig (see [`Arena::trunk`]).
    pub value: u32,
    pub state: TwigState,
    /// `None` only for the trunk twig.
    pub parent_branch: Option<BranchId>,
    pub subbranches: SiblingList<BranchId>,
}

impl Twig {
    fn new(value: u32, parent_branch: BranchId) -> Self {
        Self {
            value,
            state: TwigState::Uninitialized,
            parent_branch: Some(parent_branch),
            subbranches: SiblingList::new(),
        }
    }

    fn new_trunk() -> Self {
        Self {
            value: 0,
            state: TwigState::Uninitialized,
            parent_branch: None,
            subbranches: SiblingList::new(),
        }
    }
}

/// Owns every [`Branch`]/[`Twig`] discovered so far by one engine.
///
/// The trunk is a synthetic twig that stands in for "top level": its
/// `subbranches` list holds every root branch, in the order they were
/// first discovered.
#[derive(Debug)]
pub(crate) struct Arena {
    branches: Vec<Branch>,
    twigs: Vec<Twig>,
    pub trunk: TwigId,
}

impl Arena {
    pub fn new() -> Self {
        let twigs = vec![Twig::new_trunk()];
        Self {
            branches: Vec::new(),
            twigs,
            trunk: TwigId(0),
        }
    }

    pub fn branch(&self, id: BranchId) -> &Branch {
        &self.branches[id.0]
    }

    pub fn branch_mut(&mut self, id: BranchId) -> &mut Branch {
        &mut self.branches[id.0]
    }

    pub fn twig(&self, id: TwigId) -> &Twig {
        &self.twigs[id.0]
    }

    pub fn twig_mut(&mut self, id: TwigId) -> &mut Twig {
        &mut self.twigs[id.0]
    }

    /// Record a newly discovered branch under `parent_twig`, with
    /// `num_twigs` fresh child twigs, and return its id.
    pub fn new_branch(
        &mut self,
        name: &'static str,
        file: &'static str,
        line: u32,
        function_name: &'static str,
        num_twigs: u32,
        twig_names: Option<&'static [&'static str]>,
        parent_twig: TwigId,
    ) -> BranchId {
        let branch_id = BranchId(self.branches.len());

        let mut twigs = Vec::with_capacity(num_twigs as usize);
        for value in 0..num_twigs {
            let twig_id = TwigId(self.twigs.len());
            self.twigs.push(Twig::new(value, branch_id));
            twigs.push(twig_id);
        }

        self.branches.push(Branch {
            name,
            file,
            line,
            function_name,
            num_twigs,
            twig_names,
            parent_twig,
            twigs,
            current_twig_idx: 0,
        });

        branch_id
    }
}
