//! Analyzer enum codes.
//!
//! The analyzer hands these over as raw integers. They are decoded at
//! translation time so that an unknown code fails the translation instead of
//! being guessed.

use serde::{Deserialize, Serialize};

use crate::error::TranspileError;

/// Set operation between query branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperationType {
    UnionAll,
    UnionDistinct,
    IntersectAll,
    IntersectDistinct,
    ExceptAll,
    ExceptDistinct,
}

impl SetOperationType {
    /// SQL keyword pair joining two branches.
    pub fn keywords(&self) -> &'static str {
        match self {
            SetOperationType::UnionAll => "UNION ALL",
            SetOperationType::UnionDistinct => "UNION DISTINCT",
            SetOperationType::IntersectAll => "INTERSECT ALL",
            SetOperationType::IntersectDistinct => "INTERSECT DISTINCT",
            SetOperationType::ExceptAll => "EXCEPT ALL",
            SetOperationType::ExceptDistinct => "EXCEPT DISTINCT",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            SetOperationType::UnionAll => 0,
            SetOperationType::UnionDistinct => 1,
            SetOperationType::IntersectAll => 2,
            SetOperationType::IntersectDistinct => 3,
            SetOperationType::ExceptAll => 4,
            SetOperationType::ExceptDistinct => 5,
        }
    }
}

impl TryFrom<i32> for SetOperationType {
    type Error = TranspileError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SetOperationType::UnionAll),
            1 => Ok(SetOperationType::UnionDistinct),
            2 => Ok(SetOperationType::IntersectAll),
            3 => Ok(SetOperationType::IntersectDistinct),
            4 => Ok(SetOperationType::ExceptAll),
            5 => Ok(SetOperationType::ExceptDistinct),
            other => Err(TranspileError::UnknownSetOperation(other)),
        }
    }
}

/// Unit of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnit {
    Rows,
    Range,
}

impl FrameUnit {
    pub fn code(&self) -> i32 {
        match self {
            FrameUnit::Rows => 0,
            FrameUnit::Range => 1,
        }
    }
}

impl TryFrom<i32> for FrameUnit {
    type Error = TranspileError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FrameUnit::Rows),
            1 => Ok(FrameUnit::Range),
            other => Err(TranspileError::UnknownFrameUnit(other)),
        }
    }
}

/// Kind of a window frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryType {
    UnboundedPreceding,
    OffsetPreceding,
    CurrentRow,
    OffsetFollowing,
    UnboundedFollowing,
}

impl BoundaryType {
    pub fn code(&self) -> i32 {
        match self {
            BoundaryType::UnboundedPreceding => 0,
            BoundaryType::OffsetPreceding => 1,
            BoundaryType::CurrentRow => 2,
            BoundaryType::OffsetFollowing => 3,
            BoundaryType::UnboundedFollowing => 4,
        }
    }

    /// Whether the boundary carries an offset expression.
    pub fn has_offset(&self) -> bool {
        matches!(
            self,
            BoundaryType::OffsetPreceding | BoundaryType::OffsetFollowing
        )
    }
}

impl TryFrom<i32> for BoundaryType {
    type Error = TranspileError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BoundaryType::UnboundedPreceding),
            1 => Ok(BoundaryType::OffsetPreceding),
            2 => Ok(BoundaryType::CurrentRow),
            3 => Ok(BoundaryType::OffsetFollowing),
            4 => Ok(BoundaryType::UnboundedFollowing),
            other => Err(TranspileError::UnknownBoundaryType(other)),
        }
    }
}

/// Semantic kind of a subquery expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubqueryType {
    #[default]
    Scalar,
    Array,
    Exists,
    In,
    LikeAny,
    LikeAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_operation_codes() {
        for code in 0..6 {
            let op = SetOperationType::try_from(code).unwrap();
            assert_eq!(op.code(), code);
        }
        assert!(matches!(
            SetOperationType::try_from(6),
            Err(TranspileError::UnknownSetOperation(6))
        ));
    }

    #[test]
    fn test_boundary_codes() {
        assert_eq!(BoundaryType::try_from(2).unwrap(), BoundaryType::CurrentRow);
        assert!(BoundaryType::try_from(1).unwrap().has_offset());
        assert!(matches!(
            BoundaryType::try_from(-1),
            Err(TranspileError::UnknownBoundaryType(-1))
        ));
    }
}
