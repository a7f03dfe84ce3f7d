use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// How a column span larger than its parent grid is treated.
///
/// Only spans entered through forms pass through the policy; trees loaded
/// from storage are taken as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanPolicy {
    /// Keep the requested span even when it exceeds the grid
    #[default]
    Permissive,

    /// Lower the span to the grid size
    Clamp,

    /// Refuse the edit
    Reject,
}

impl SpanPolicy {
    /// Resolve a requested span against the size of the parent grid.
    ///
    /// Blocks outside a grid never carry a span, so `parent_size == None`
    /// drops it.
    pub fn resolve(
        &self,
        span: u32,
        parent_size: Option<u32>,
    ) -> Result<Option<u32>, ValidationError> {
        if span == 0 {
            return Err(ValidationError::NotPositive {
                field: "columnSpan",
                value: span.to_string(),
            });
        }

        let Some(max) = parent_size else {
            return Ok(None);
        };

        match self {
            SpanPolicy::Permissive => Ok(Some(span)),
            SpanPolicy::Clamp => Ok(Some(span.min(max.max(1)))),
            SpanPolicy::Reject if span > max => {
                Err(ValidationError::ColumnSpanOutOfRange { span, max })
            }
            SpanPolicy::Reject => Ok(Some(span)),
        }
    }

    /// Input bounds to offer in a span field: `1..=grid size`
    pub fn hint(parent_size: u32) -> std::ops::RangeInclusive<u32> {
        1..=parent_size.max(1)
    }
}
