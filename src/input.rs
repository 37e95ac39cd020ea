use crate::errors::{CountingError, CountingResult};

/// Parse comma separated indices such as `"0,3,7"`. Surrounding whitespace of each token,
/// including a trailing newline, is ignored. Negative indices parse and are left for the index
/// policy to judge. Any token which is not an integer, the empty one included, is an error.
///
/// # Example
/// ```
/// use qcount::input::parse_marked_indices;
///
/// assert_eq!(parse_marked_indices("0,3,7\n").unwrap(), vec![0, 3, 7]);
/// assert_eq!(parse_marked_indices("0,-1").unwrap(), vec![0, -1]);
/// assert!(parse_marked_indices("0,,7").is_err());
/// ```
pub fn parse_marked_indices(input: &str) -> CountingResult<Vec<i64>> {
    input
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|source| CountingError::Parse {
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}
