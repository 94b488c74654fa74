//! Endpoint clients layered over [`HotmartClient`](crate::client::HotmartClient).
//!
//! Each client shapes paths and query parameters for one API area and reshapes the decoded
//! payload. None of them handle errors: failures from the pipeline propagate unchanged.

pub mod pages;
pub mod students;
pub mod subscriptions;

pub use pages::*;
pub use students::*;
pub use subscriptions::*;

// self
use crate::{_prelude::*, model::ApiResponse};

/// Page size used when walking every page of a listing.
pub const PAGE_SIZE: u32 = 100;

/// Follows `next_page_token` until the listing ends, collecting every item.
pub(crate) async fn collect_pages<R, F, Fut>(mut fetch: F) -> Result<Vec<R>>
where
	F: FnMut(Option<String>) -> Fut,
	Fut: Future<Output = Result<ApiResponse<R>>>,
{
	let mut items = Vec::new();
	let mut page_token = None;

	loop {
		let ApiResponse { items: batch, page_info } = fetch(page_token.take()).await?;

		items.extend(batch);

		match page_info.next_token() {
			Some(token) => page_token = Some(token.to_owned()),
			None => break,
		}
	}

	Ok(items)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::PageInfo;

	#[tokio::test]
	async fn collect_pages_follows_tokens() {
		let mut seen = Vec::new();
		let items = collect_pages(|token: Option<String>| {
			seen.push(token.clone());

			let (batch, next) = match token.as_deref() {
				None => (vec![1, 2], Some("p2")),
				Some("p2") => (vec![3], Some("")),
				Some(other) => panic!("Unexpected token `{other}`."),
			};

			async move {
				Ok(ApiResponse {
					items: batch,
					page_info: PageInfo {
						next_page_token: next.map(str::to_owned),
						..Default::default()
					},
				})
			}
		})
		.await
		.expect("Pagination should succeed.");

		assert_eq!(items, vec![1, 2, 3]);
		assert_eq!(seen, vec![None, Some("p2".to_owned())]);
	}
}
