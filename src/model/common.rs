//! Pagination envelope and timestamp helpers shared by every listing endpoint.

// self
use crate::_prelude::*;

/// Cursor metadata returned alongside list results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
	/// Total number of matching records, when reported.
	#[serde(default)]
	pub total_results: Option<u64>,
	/// Cursor for the next page.
	#[serde(default)]
	pub next_page_token: Option<String>,
	/// Cursor for the previous page.
	#[serde(default)]
	pub prev_page_token: Option<String>,
	/// Page size used by the server.
	#[serde(default)]
	pub results_per_page: u32,
}
impl PageInfo {
	/// Next-page cursor, treating an empty token as the end of the listing.
	pub fn next_token(&self) -> Option<&str> {
		self.next_page_token.as_deref().filter(|token| !token.is_empty())
	}
}

/// Paginated list envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
	/// Records on this page.
	#[serde(default = "Vec::new")]
	pub items: Vec<T>,
	/// Cursor metadata.
	#[serde(default)]
	pub page_info: PageInfo,
}

/// Converts a Unix timestamp in seconds to a UTC instant; absent or zero values map to `None`.
pub fn from_unix_seconds(seconds: Option<i64>) -> Option<OffsetDateTime> {
	seconds.filter(|value| *value != 0).and_then(|value| OffsetDateTime::from_unix_timestamp(value).ok())
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn unix_seconds_convert_and_skip_zero() {
		assert_eq!(from_unix_seconds(Some(1_700_000_000)), Some(datetime!(2023-11-14 22:13:20 UTC)));
		assert_eq!(from_unix_seconds(Some(0)), None);
		assert_eq!(from_unix_seconds(None), None);
	}

	#[test]
	fn empty_next_token_ends_pagination() {
		let info: PageInfo = serde_json::from_str(r#"{"next_page_token":"","results_per_page":10}"#)
			.expect("Page info should deserialize.");

		assert_eq!(info.next_token(), None);

		let envelope: ApiResponse<u32> = serde_json::from_str(r#"{"items":[1,2]}"#)
			.expect("Envelope without page_info should deserialize.");

		assert_eq!(envelope.items, vec![1, 2]);
		assert_eq!(envelope.page_info, PageInfo::default());
	}
}
