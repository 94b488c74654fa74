//! Subscription listing, summaries, and lifecycle actions (cancel, reactivate, billing day).

// self
use crate::{
	_prelude::*,
	api::{self, PAGE_SIZE},
	client::{HotmartClient, RequestOptions},
	error::ValidationError,
	http::HttpTransport,
	model::{
		ApiResponse, CancelSubscriptionRequest, ChangeBillingDayRequest,
		ReactivateSubscriptionRequest, Subscription, SubscriptionActionResponse,
		SubscriptionStatus, SubscriptionSummary,
	},
};

const SUBSCRIPTIONS_PATH: &str = "/payments/api/v1/subscriptions";

/// Filters accepted by the subscription listing.
///
/// Unset fields are omitted from the query. Timestamps are Unix seconds; list-valued filters are
/// sent as repeated keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetSubscriptionsOptions {
	/// Page size.
	pub max_results: Option<u32>,
	/// Cursor from a previous page.
	pub page_token: Option<String>,
	/// Product identifier.
	pub product_id: Option<u64>,
	/// Plan names.
	pub plan: Vec<String>,
	/// Plan identifier.
	pub plan_id: Option<u64>,
	/// Lower bound of the accession date.
	pub accession_date: Option<i64>,
	/// Upper bound of the accession date.
	pub end_accession_date: Option<i64>,
	/// Statuses to include.
	pub status: Vec<SubscriptionStatus>,
	/// Subscriber code.
	pub subscriber_code: Option<String>,
	/// Subscriber email.
	pub subscriber_email: Option<String>,
	/// Originating transaction.
	pub transaction: Option<String>,
	/// Trial filter.
	pub trial: Option<bool>,
	/// Lower bound of the cancellation date.
	pub cancelation_date: Option<i64>,
	/// Upper bound of the cancellation date.
	pub end_cancelation_date: Option<i64>,
	/// Lower bound of the next charge date.
	pub date_next_charge: Option<i64>,
	/// Upper bound of the next charge date.
	pub end_date_next_charge: Option<i64>,
}
impl GetSubscriptionsOptions {
	/// Restricts the listing to `statuses`.
	pub fn with_status(mut self, statuses: impl IntoIterator<Item = SubscriptionStatus>) -> Self {
		self.status = statuses.into_iter().collect();

		self
	}

	/// Restricts the listing to one product.
	pub fn with_product_id(mut self, product_id: Option<u64>) -> Self {
		self.product_id = product_id;

		self
	}

	/// Restricts the listing to one subscriber code.
	pub fn with_subscriber_code(mut self, code: impl Into<String>) -> Self {
		self.subscriber_code = Some(code.into());

		self
	}

	/// Restricts the listing to one subscriber email.
	pub fn with_subscriber_email(mut self, email: impl Into<String>) -> Self {
		self.subscriber_email = Some(email.into());

		self
	}

	fn to_request_options(&self) -> RequestOptions {
		RequestOptions::new()
			.query_opt("max_results", self.max_results.filter(|v| *v > 0))
			.query_opt("page_token", non_empty(&self.page_token))
			.query_opt("product_id", self.product_id.filter(|v| *v > 0))
			.query_all("plan", &self.plan)
			.query_opt("plan_id", self.plan_id.filter(|v| *v > 0))
			.query_opt("accession_date", self.accession_date.filter(|v| *v != 0))
			.query_opt("end_accession_date", self.end_accession_date.filter(|v| *v != 0))
			.query_all("status", self.status.iter().map(|s| s.as_str()))
			.query_opt("subscriber_code", non_empty(&self.subscriber_code))
			.query_opt("subscriber_email", non_empty(&self.subscriber_email))
			.query_opt("transaction", non_empty(&self.transaction))
			.query_opt("trial", self.trial)
			.query_opt("cancelation_date", self.cancelation_date.filter(|v| *v != 0))
			.query_opt("end_cancelation_date", self.end_cancelation_date.filter(|v| *v != 0))
			.query_opt("date_next_charge", self.date_next_charge.filter(|v| *v != 0))
			.query_opt("end_date_next_charge", self.end_date_next_charge.filter(|v| *v != 0))
	}
}

/// Filters accepted by the summary listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetSubscriptionsSummaryOptions {
	/// Page size.
	pub max_results: Option<u32>,
	/// Cursor from a previous page.
	pub page_token: Option<String>,
	/// Product identifier.
	pub product_id: Option<u64>,
	/// Subscriber code.
	pub subscriber_code: Option<String>,
	/// Lower bound of the accession date.
	pub accession_date: Option<i64>,
	/// Upper bound of the accession date.
	pub end_accession_date: Option<i64>,
	/// Lower bound of the next charge date.
	pub date_next_charge: Option<i64>,
}
impl GetSubscriptionsSummaryOptions {
	fn to_request_options(&self) -> RequestOptions {
		RequestOptions::new()
			.query_opt("max_results", self.max_results.filter(|v| *v > 0))
			.query_opt("page_token", non_empty(&self.page_token))
			.query_opt("product_id", self.product_id.filter(|v| *v > 0))
			.query_opt("subscriber_code", non_empty(&self.subscriber_code))
			.query_opt("accession_date", self.accession_date.filter(|v| *v != 0))
			.query_opt("end_accession_date", self.end_accession_date.filter(|v| *v != 0))
			.query_opt("date_next_charge", self.date_next_charge.filter(|v| *v != 0))
	}
}

/// Result of [`Subscriptions::verify_access`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriptionAccess {
	/// At least one subscription is active.
	pub has_active_subscription: bool,
	/// Every subscription of the email.
	pub subscriptions: Vec<Subscription>,
	/// Active subscriptions only.
	pub active: Vec<Subscription>,
}
impl SubscriptionAccess {
	/// Splits `subscriptions` into the access result.
	pub fn from_subscriptions(subscriptions: Vec<Subscription>) -> Self {
		let active = subscriptions.iter().filter(|s| s.is_active()).cloned().collect::<Vec<_>>();

		Self { has_active_subscription: !active.is_empty(), subscriptions, active }
	}
}

/// Client for `/payments/api/v1/subscriptions`.
pub struct Subscriptions<T>
where
	T: ?Sized + HttpTransport,
{
	client: Arc<HotmartClient<T>>,
}
impl<T> Subscriptions<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates the endpoint client over a shared pipeline.
	pub fn new(client: Arc<HotmartClient<T>>) -> Self {
		Self { client }
	}

	/// Lists one page of subscriptions.
	pub async fn list(&self, options: &GetSubscriptionsOptions) -> Result<ApiResponse<Subscription>> {
		self.client.get(SUBSCRIPTIONS_PATH, options.to_request_options()).await
	}

	/// Lists one page of subscription summaries.
	pub async fn summary(
		&self,
		options: &GetSubscriptionsSummaryOptions,
	) -> Result<ApiResponse<SubscriptionSummary>> {
		self.client
			.get(&format!("{SUBSCRIPTIONS_PATH}/summary"), options.to_request_options())
			.await
	}

	/// First subscription with the given subscriber code.
	pub async fn by_code(&self, subscriber_code: &str) -> Result<Option<Subscription>> {
		let options = GetSubscriptionsOptions::default().with_subscriber_code(subscriber_code);

		Ok(self.list(&options).await?.items.into_iter().next())
	}

	/// Subscriptions of one subscriber email (first page).
	pub async fn by_email(&self, email: &str) -> Result<Vec<Subscription>> {
		let options = GetSubscriptionsOptions::default().with_subscriber_email(email);

		Ok(self.list(&options).await?.items)
	}

	/// Cancels the subscriptions named in `request`.
	pub async fn cancel(&self, request: &CancelSubscriptionRequest) -> Result<SubscriptionActionResponse> {
		self.client
			.post(&format!("{SUBSCRIPTIONS_PATH}/cancel"), request, RequestOptions::default())
			.await
	}

	/// Cancels one subscription.
	pub async fn cancel_one(
		&self,
		subscriber_code: &str,
		send_mail: bool,
	) -> Result<SubscriptionActionResponse> {
		self.bulk_cancel([subscriber_code], send_mail).await
	}

	/// Cancels several subscriptions at once.
	pub async fn bulk_cancel<I, S>(&self, subscriber_codes: I, send_mail: bool) -> Result<SubscriptionActionResponse>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let request = CancelSubscriptionRequest {
			subscriber_code: subscriber_codes.into_iter().map(Into::into).collect(),
			send_mail: Some(send_mail),
		};

		self.cancel(&request).await
	}

	/// Reactivates the subscriptions named in `request`.
	pub async fn reactivate(
		&self,
		request: &ReactivateSubscriptionRequest,
	) -> Result<SubscriptionActionResponse> {
		self.client
			.post(&format!("{SUBSCRIPTIONS_PATH}/reactivate"), request, RequestOptions::default())
			.await
	}

	/// Reactivates one subscription through its dedicated endpoint.
	pub async fn reactivate_one(
		&self,
		subscriber_code: &str,
		charge: bool,
	) -> Result<SubscriptionActionResponse> {
		let request = ReactivateSubscriptionRequest { subscriber_code: None, charge: Some(charge) };

		self.client
			.post(
				&format!("{SUBSCRIPTIONS_PATH}/{subscriber_code}/reactivate"),
				&request,
				RequestOptions::default(),
			)
			.await
	}

	/// Reactivates several subscriptions at once.
	pub async fn bulk_reactivate<I, S>(
		&self,
		subscriber_codes: I,
		charge: bool,
	) -> Result<SubscriptionActionResponse>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let request = ReactivateSubscriptionRequest {
			subscriber_code: Some(subscriber_codes.into_iter().map(Into::into).collect()),
			charge: Some(charge),
		};

		self.reactivate(&request).await
	}

	/// Moves the monthly charge of a subscription to `due_day`.
	///
	/// `due_day` outside `1..=31` fails with [`ValidationError::DueDayOutOfRange`] before any
	/// request is sent.
	pub async fn change_billing_day(&self, subscriber_code: &str, due_day: u8) -> Result<()> {
		if !(1..=31).contains(&due_day) {
			return Err(ValidationError::DueDayOutOfRange { due_day }.into());
		}

		self.client
			.patch(
				&format!("{SUBSCRIPTIONS_PATH}/{subscriber_code}"),
				&ChangeBillingDayRequest { due_day },
				RequestOptions::default(),
			)
			.await
	}

	/// Looks up `email` and reports whether any subscription is active.
	pub async fn verify_access(&self, email: &str) -> Result<SubscriptionAccess> {
		Ok(SubscriptionAccess::from_subscriptions(self.by_email(email).await?))
	}

	/// Every active subscription, walking all pages.
	pub async fn all_active(&self, product_id: Option<u64>) -> Result<Vec<Subscription>> {
		self.all_matching(
			GetSubscriptionsOptions::default()
				.with_product_id(product_id)
				.with_status([SubscriptionStatus::Active]),
		)
		.await
	}

	/// Every overdue subscription, walking all pages.
	pub async fn all_overdue(&self, product_id: Option<u64>) -> Result<Vec<Subscription>> {
		self.all_matching(
			GetSubscriptionsOptions::default()
				.with_product_id(product_id)
				.with_status([SubscriptionStatus::Overdue]),
		)
		.await
	}

	/// Every cancelled subscription, walking all pages.
	pub async fn all_cancelled(&self, product_id: Option<u64>) -> Result<Vec<Subscription>> {
		self.all_matching(
			GetSubscriptionsOptions::default()
				.with_product_id(product_id)
				.with_status(SubscriptionStatus::CANCELLED),
		)
		.await
	}

	/// Every subscription whose accession falls between `start` and `end`, walking all pages.
	pub async fn by_date_range(
		&self,
		start: OffsetDateTime,
		end: OffsetDateTime,
		product_id: Option<u64>,
	) -> Result<Vec<Subscription>> {
		let mut options = GetSubscriptionsOptions::default().with_product_id(product_id);

		options.accession_date = Some(start.unix_timestamp());
		options.end_accession_date = Some(end.unix_timestamp());

		self.all_matching(options).await
	}

	/// Walks every page of the listing for `filter`.
	pub async fn all_matching(&self, filter: GetSubscriptionsOptions) -> Result<Vec<Subscription>> {
		api::collect_pages(|page_token| {
			let mut options = filter.clone();

			options.max_results = Some(PAGE_SIZE);
			options.page_token = page_token;

			async move { self.list(&options).await }
		})
		.await
	}
}
impl<T> Clone for Subscriptions<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<T> Debug for Subscriptions<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Subscriptions").field("client", &self.client).finish()
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}
