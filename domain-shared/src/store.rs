/// Opaque row handle assigned by a pass store adapter. Only meaningful when
/// passed back to the same store instance that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowIndex(pub usize);
