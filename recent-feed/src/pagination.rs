use crate::types::{PageWindow, ValidationError};

impl PageWindow {
    /// Validate raw `start`/`limit` query values.
    ///
    /// A missing `start` means the top of the feed and a missing `limit` falls
    /// back to `default_limit`. Values that are present must be base-10
    /// integers, with `start >= 0` and `limit >= 1`.
    pub fn parse(
        start: Option<&str>,
        limit: Option<&str>,
        default_limit: usize,
    ) -> Result<Self, ValidationError> {
        let start = match start {
            Some(raw) => parse_start(raw)?,
            None => 0,
        };
        let limit = match limit {
            Some(raw) => parse_limit(raw)?,
            None => default_limit.max(1),
        };

        Ok(Self { start, limit })
    }

    /// Take the window out of an already ordered feed.
    ///
    /// A start past the end yields nothing and a limit past the end is clipped.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.start)
            .take(self.limit)
            .collect()
    }
}

/// Validate `start` and `limit` and slice `entries` in one step.
pub fn window<T>(entries: Vec<T>, start: &str, limit: &str) -> Result<Vec<T>, ValidationError> {
    let page = PageWindow {
        start: parse_start(start)?,
        limit: parse_limit(limit)?,
    };
    Ok(page.slice(entries))
}

fn parse_start(raw: &str) -> Result<usize, ValidationError> {
    let value = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidStart)?;
    usize::try_from(value).map_err(|_| ValidationError::InvalidStart)
}

fn parse_limit(raw: &str) -> Result<usize, ValidationError> {
    let value = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidLimit)?;
    match usize::try_from(value) {
        Ok(0) | Err(_) => Err(ValidationError::InvalidLimit),
        Ok(limit) => Ok(limit),
    }
}
