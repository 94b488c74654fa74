//! Pages of a club module.

// self
use crate::{
	_prelude::*,
	client::{HotmartClient, RequestOptions},
	http::HttpTransport,
	model::{self, Page, PageType},
};

/// Default number of pages returned by the ranking helpers.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Client for `/club/api/v2/modules/{module_id}/pages`.
pub struct Pages<T>
where
	T: ?Sized + HttpTransport,
{
	client: Arc<HotmartClient<T>>,
}
impl<T> Pages<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates the endpoint client over a shared pipeline.
	pub fn new(client: Arc<HotmartClient<T>>) -> Self {
		Self { client }
	}

	/// Every page of a module.
	pub async fn list(&self, product_id: u64, module_id: &str) -> Result<Vec<Page>> {
		self.client
			.get(
				&format!("/club/api/v2/modules/{module_id}/pages"),
				RequestOptions::new().query("product_id", product_id),
			)
			.await
	}

	/// Finds one page of a module.
	pub async fn by_id(&self, product_id: u64, module_id: &str, page_id: &str) -> Result<Option<Page>> {
		Ok(self.list(product_id, module_id).await?.into_iter().find(|page| page.page_id == page_id))
	}

	/// Content pages of a module.
	pub async fn all_content(&self, product_id: u64, module_id: &str) -> Result<Vec<Page>> {
		self.of_type(product_id, module_id, PageType::Content).await
	}

	/// Quiz pages of a module.
	pub async fn all_quizzes(&self, product_id: u64, module_id: &str) -> Result<Vec<Page>> {
		self.of_type(product_id, module_id, PageType::Quiz).await
	}

	/// Webinar pages of a module.
	pub async fn all_webinars(&self, product_id: u64, module_id: &str) -> Result<Vec<Page>> {
		self.of_type(product_id, module_id, PageType::Webinar).await
	}

	/// Highest-rated pages, at most `limit` (default [`DEFAULT_RANKING_LIMIT`]).
	pub async fn top_rated(
		&self,
		product_id: u64,
		module_id: &str,
		limit: Option<usize>,
	) -> Result<Vec<Page>> {
		let pages = self.list(product_id, module_id).await?;
		let mut ranked = model::sort_by_rating(&pages, true);

		ranked.truncate(limit.unwrap_or(DEFAULT_RANKING_LIMIT));

		Ok(ranked)
	}

	/// Most commented pages, at most `limit` (default [`DEFAULT_RANKING_LIMIT`]).
	pub async fn most_commented(
		&self,
		product_id: u64,
		module_id: &str,
		limit: Option<usize>,
	) -> Result<Vec<Page>> {
		let mut pages = self.list(product_id, module_id).await?;

		pages.sort_by(|a, b| b.total_comments.cmp(&a.total_comments));
		pages.truncate(limit.unwrap_or(DEFAULT_RANKING_LIMIT));

		Ok(pages)
	}

	async fn of_type(&self, product_id: u64, module_id: &str, kind: PageType) -> Result<Vec<Page>> {
		Ok(model::pages_by_type(&self.list(product_id, module_id).await?, kind))
	}
}
impl<T> Clone for Pages<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<T> Debug for Pages<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Pages").field("client", &self.client).finish()
	}
}
