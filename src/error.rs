/// Reasons an [`AliasTable`](crate::AliasTable) cannot be built.
///
/// Every variant is detected at construction time; sampling a built table
/// never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionError {
    EmptyInput,
    NegativeWeight { index: usize, value: f64 },
    NonFiniteWeight { index: usize, value: f64 },
    ZeroTotalWeight,
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionError::EmptyInput => write!(f, "no keys were supplied"),
            ConstructionError::NegativeWeight { index, value } => {
                write!(f, "weight for slot {index} is negative: {value}")
            }
            ConstructionError::NonFiniteWeight { index, value } => {
                write!(f, "weight for slot {index} is not finite: {value}")
            }
            ConstructionError::ZeroTotalWeight => {
                write!(f, "all weights are zero")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}
