/// The result of measuring a subtree while checking that it is balanced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Height {
    /// Every node in the subtree is balanced and the subtree has this many levels.
    Balanced(usize),
    /// Some node in the subtree has children whose heights differ by more than one. Once seen,
    /// no more heights are computed on the way back up.
    Unbalanced,
}
