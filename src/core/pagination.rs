//! Cursor-based pagination over repository-ordered record lists
//!
//! Converts a flat, already-filtered sequence of receivers into a page of
//! edges (cursor + node pairs) plus page metadata. A cursor is the base64
//! encoding of a record's id string; the engine never sorts — order is
//! whatever the repository returned, which the repository contract requires
//! to be stable across calls.
//!
//! The whole transformation is a single O(n) pass with no I/O.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::error::{ReceiverError, ValidationError};
use crate::core::receiver::Receiver;

/// Page size used when the caller does not pass `first`.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A single record in a page, addressable by its cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub cursor: String,
    pub node: Receiver,
}

/// Position metadata for a page.
///
/// All fields stay `None` for a page with no edges; cursors are never
/// synthesized as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: Option<bool>,
}

/// One page of receivers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connection {
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
}

/// Encode a record id as an opaque cursor.
pub fn encode_cursor(id: &str) -> String {
    BASE64.encode(id.as_bytes())
}

/// Decode a cursor back to the record id it was built from.
///
/// `decode_cursor(&encode_cursor(id)) == id` for any id string.
pub fn decode_cursor(cursor: &str) -> Result<String, ReceiverError> {
    let bytes = BASE64
        .decode(cursor)
        .map_err(|_| ValidationError::InvalidCursor {
            value: cursor.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|_| {
        ValidationError::InvalidCursor {
            value: cursor.to_string(),
        }
        .into()
    })
}

/// Build one page out of `records`.
///
/// With no cursor (or a cursor decoding to the empty string) the page starts
/// at the beginning; otherwise it starts immediately after the record whose
/// id matches the decoded cursor. A cursor matching no record yields an
/// empty page, not an error. `has_next_page` reports whether any record of
/// the original sequence follows the last edge positionally.
///
/// A non-positive `first` yields an empty page.
pub fn paginate(
    records: Vec<Receiver>,
    first: Option<i32>,
    after: Option<&str>,
) -> Result<Connection, ReceiverError> {
    let page_size = match first {
        None => DEFAULT_PAGE_SIZE,
        Some(n) if n <= 0 => 0,
        Some(n) => n as usize,
    };

    let cursor = match after {
        Some(encoded) => decode_cursor(encoded)?,
        None => String::new(),
    };

    if records.is_empty() {
        return Ok(Connection::default());
    }

    let mut in_current_page = cursor.is_empty();
    let mut has_next_page = false;
    let mut edges: Vec<Edge> = Vec::with_capacity(page_size.min(records.len()));

    for receiver in records {
        if edges.len() == page_size {
            has_next_page = true;
            break;
        }

        let id = receiver.id.to_string();
        if in_current_page {
            edges.push(Edge {
                cursor: encode_cursor(&id),
                node: receiver,
            });
        } else if id == cursor {
            in_current_page = true;
        }
    }

    if edges.is_empty() {
        return Ok(Connection::default());
    }

    let page_info = PageInfo {
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        has_next_page: Some(has_next_page),
    };

    Ok(Connection { edges, page_info })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pix::{Pix, PixKeyType};
    use crate::core::receiver::Status;
    use uuid::Uuid;

    fn receivers(count: usize) -> Vec<Receiver> {
        (0..count)
            .map(|i| Receiver {
                id: Uuid::new_v4(),
                identifier: "111.111.111-11".to_string(),
                name: format!("Receiver {}", i),
                email: "PAY@ACME.COM".to_string(),
                pix: Pix::new(PixKeyType::Cpf, "111.111.111-11"),
                bank: None,
                agency: None,
                account: None,
                status: Status::Draft,
            })
            .collect()
    }

    #[test]
    fn test_cursor_round_trip() {
        for id in ["a", "some-long-id", "123e4567-e89b-12d3-a456-426614174000"] {
            assert_eq!(decode_cursor(&encode_cursor(id)).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_cursor("not base64!!!").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CURSOR");
    }

    #[test]
    fn test_empty_records_give_unset_page_info() {
        let connection = paginate(Vec::new(), None, None).unwrap();
        assert!(connection.edges.is_empty());
        assert_eq!(connection.page_info, PageInfo::default());
    }

    #[test]
    fn test_first_page_without_cursor() {
        let records = receivers(5);
        let connection = paginate(records.clone(), Some(3), None).unwrap();

        assert_eq!(connection.edges.len(), 3);
        for (edge, record) in connection.edges.iter().zip(&records) {
            assert_eq!(edge.node.id, record.id);
            assert_eq!(edge.cursor, encode_cursor(&record.id.to_string()));
        }
        assert_eq!(connection.page_info.has_next_page, Some(true));
        assert_eq!(
            connection.page_info.start_cursor.as_deref(),
            Some(connection.edges[0].cursor.as_str())
        );
        assert_eq!(
            connection.page_info.end_cursor.as_deref(),
            Some(connection.edges[2].cursor.as_str())
        );
    }

    #[test]
    fn test_second_page_after_cursor() {
        let records = receivers(5);
        let after = encode_cursor(&records[2].id.to_string());
        let connection = paginate(records.clone(), Some(3), Some(&after)).unwrap();

        assert_eq!(connection.edges.len(), 2);
        assert_eq!(connection.edges[0].node.id, records[3].id);
        assert_eq!(connection.edges[1].node.id, records[4].id);
        assert_eq!(connection.page_info.has_next_page, Some(false));
    }

    #[test]
    fn test_concatenated_pages_reproduce_the_sequence() {
        let records = receivers(10);
        let mut seen = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let connection = paginate(records.clone(), Some(3), after.as_deref()).unwrap();
            seen.extend(connection.edges.iter().map(|edge| edge.node.id));
            match connection.page_info.has_next_page {
                Some(true) => after = connection.page_info.end_cursor.clone(),
                _ => break,
            }
        }

        let expected: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_exact_page_boundary_has_no_next() {
        let records = receivers(6);
        let after = encode_cursor(&records[2].id.to_string());
        let connection = paginate(records, Some(3), Some(&after)).unwrap();

        assert_eq!(connection.edges.len(), 3);
        assert_eq!(connection.page_info.has_next_page, Some(false));
    }

    #[test]
    fn test_unmatched_cursor_gives_empty_page() {
        let records = receivers(4);
        let after = encode_cursor(&Uuid::new_v4().to_string());
        let connection = paginate(records, Some(3), Some(&after)).unwrap();

        assert!(connection.edges.is_empty());
        assert_eq!(connection.page_info, PageInfo::default());
    }

    #[test]
    fn test_cursor_at_last_record_gives_empty_page() {
        let records = receivers(4);
        let after = encode_cursor(&records[3].id.to_string());
        let connection = paginate(records, None, Some(&after)).unwrap();

        assert!(connection.edges.is_empty());
        assert_eq!(connection.page_info, PageInfo::default());
    }

    #[test]
    fn test_empty_decoded_cursor_starts_at_beginning() {
        let records = receivers(3);
        let after = encode_cursor("");
        let connection = paginate(records.clone(), Some(2), Some(&after)).unwrap();

        assert_eq!(connection.edges.len(), 2);
        assert_eq!(connection.edges[0].node.id, records[0].id);
    }

    #[test]
    fn test_default_page_size_is_ten() {
        let records = receivers(12);
        let connection = paginate(records, None, None).unwrap();

        assert_eq!(connection.edges.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(connection.page_info.has_next_page, Some(true));
    }

    #[test]
    fn test_non_positive_page_size_gives_empty_page() {
        let records = receivers(3);

        let connection = paginate(records.clone(), Some(0), None).unwrap();
        assert!(connection.edges.is_empty());
        assert_eq!(connection.page_info, PageInfo::default());

        let connection = paginate(records, Some(-7), None).unwrap();
        assert!(connection.edges.is_empty());
    }

    #[test]
    fn test_page_size_larger_than_records() {
        let records = receivers(2);
        let connection = paginate(records, Some(10), None).unwrap();

        assert_eq!(connection.edges.len(), 2);
        assert_eq!(connection.page_info.has_next_page, Some(false));
    }
}
