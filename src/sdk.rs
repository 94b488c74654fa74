//! [`Hotmart`] facade answering cross-endpoint access questions.
//!
//! The facade owns one shared [`HotmartClient`] and the three endpoint clients built on top of
//! it, so every call shares the same cached token. Combined checks issue the member lookup and
//! the subscription lookup concurrently; both must succeed.

// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	api::{Pages, StudentAccess, StudentAccessType, Students, SubscriptionAccess, Subscriptions},
	client::HotmartClient,
	config::ClientConfig,
	http::HttpTransport,
	model::{
		Student, StudentProgress, StudentRole, StudentStatus, StudentType, Subscription,
		SubscriptionStatus,
	},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Facade specialized for the crate's default reqwest transport.
pub type ReqwestHotmart = Hotmart<ReqwestTransport>;

/// How an email gained access, in precedence order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessType {
	/// Holds an active subscription.
	Subscription,
	/// Active buyer in the club.
	Paid,
	/// Free club member.
	Free,
	/// No access.
	#[default]
	None,
}
impl AccessType {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Subscription => "subscription",
			Self::Paid => "paid",
			Self::Free => "free",
			Self::None => "none",
		}
	}
}
impl Display for AccessType {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl From<StudentAccessType> for AccessType {
	fn from(kind: StudentAccessType) -> Self {
		match kind {
			StudentAccessType::Paid => Self::Paid,
			StudentAccessType::Free => Self::Free,
			StudentAccessType::None => Self::None,
		}
	}
}

/// Which records back an email's access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessKind {
	/// Club member only.
	Student,
	/// Subscriber only.
	Subscriber,
	/// Club member and subscriber.
	Both,
	/// Neither.
	#[default]
	None,
}
impl AccessKind {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Student => "student",
			Self::Subscriber => "subscriber",
			Self::Both => "both",
			Self::None => "none",
		}
	}
}
impl Display for AccessKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Combined member and subscription view of one email.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessReport {
	/// A member record exists.
	pub is_student: bool,
	/// At least one subscription is active.
	pub is_subscriber: bool,
	/// Active member or active subscriber.
	pub has_access: bool,
	/// Strongest access source.
	pub access_type: AccessType,
	/// Member record, when found.
	pub student: Option<Student>,
	/// Every subscription of the email.
	pub subscriptions: Vec<Subscription>,
}
impl AccessReport {
	/// Merges the two lookups; a subscription outranks paid and free membership.
	pub fn combine(student: StudentAccess, subscription: SubscriptionAccess) -> Self {
		let is_student = student.student.is_some();
		let is_subscriber = subscription.has_active_subscription;
		let access_type =
			if is_subscriber { AccessType::Subscription } else { student.access_type.into() };

		Self {
			is_student,
			is_subscriber,
			has_access: student.has_access || is_subscriber,
			access_type,
			student: student.student,
			subscriptions: subscription.subscriptions,
		}
	}

	/// Collapses the report into a [`QuickCheck`].
	pub fn quick_check(&self) -> QuickCheck {
		let kind = match (self.is_student, self.is_subscriber) {
			(true, true) => AccessKind::Both,
			(true, false) => AccessKind::Student,
			(false, true) => AccessKind::Subscriber,
			(false, false) => AccessKind::None,
		};

		QuickCheck { has_access: self.has_access, kind }
	}
}

/// Result of [`Hotmart::quick_check`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuickCheck {
	/// Active member or active subscriber.
	pub has_access: bool,
	/// Which records back the access.
	pub kind: AccessKind,
}

/// Member fields surfaced by [`AccessSummary`].
#[derive(Clone, Debug, PartialEq)]
pub struct StudentInfo {
	/// Display name.
	pub name: String,
	/// Club role.
	pub role: StudentRole,
	/// Access status.
	pub status: StudentStatus,
	/// Entry type.
	pub kind: StudentType,
	/// Aggregate lesson progress.
	pub progress: StudentProgress,
	/// Last access.
	pub last_access: Option<OffsetDateTime>,
	/// First access.
	pub first_access: Option<OffsetDateTime>,
}
impl From<&Student> for StudentInfo {
	fn from(student: &Student) -> Self {
		Self {
			name: student.name.clone(),
			role: student.role,
			status: student.status,
			kind: student.kind,
			progress: student.progress.clone(),
			last_access: student.last_access(),
			first_access: student.first_access(),
		}
	}
}

/// Subscription fields surfaced by [`AccessSummary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionDetail {
	/// Subscriber code.
	pub subscriber_code: String,
	/// Lifecycle status.
	pub status: SubscriptionStatus,
	/// Plan name.
	pub plan_name: String,
	/// Product name.
	pub product_name: String,
	/// Accession.
	pub accession_date: Option<OffsetDateTime>,
	/// Next charge.
	pub next_charge_date: Option<OffsetDateTime>,
	/// In its trial period.
	pub trial: bool,
}
impl From<&Subscription> for SubscriptionDetail {
	fn from(sub: &Subscription) -> Self {
		Self {
			subscriber_code: sub.subscriber_code.clone(),
			status: sub.status,
			plan_name: sub.plan.name.clone(),
			product_name: sub.product.name.clone(),
			accession_date: sub.accession(),
			next_charge_date: sub.next_charge(),
			trial: sub.trial,
		}
	}
}

/// Subscription counts surfaced by [`AccessSummary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionInfo {
	/// Number of subscriptions.
	pub total: usize,
	/// Number of active subscriptions.
	pub active: usize,
	/// Per-subscription details.
	pub subscriptions: Vec<SubscriptionDetail>,
}

/// Flattened, display-oriented access report for one email.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessSummary {
	/// Email the summary describes.
	pub email: String,
	/// Active member or active subscriber.
	pub has_access: bool,
	/// Strongest access source.
	pub access_type: AccessType,
	/// A member record exists.
	pub is_student: bool,
	/// At least one subscription is active.
	pub is_subscriber: bool,
	/// Member details, when a record was found.
	pub student_info: Option<StudentInfo>,
	/// Subscription details, when any subscription exists.
	pub subscription_info: Option<SubscriptionInfo>,
}
impl AccessSummary {
	/// Flattens `report` for `email`.
	pub fn from_report(email: impl Into<String>, report: &AccessReport) -> Self {
		let subscription_info = (!report.subscriptions.is_empty()).then(|| SubscriptionInfo {
			total: report.subscriptions.len(),
			active: report.subscriptions.iter().filter(|s| s.is_active()).count(),
			subscriptions: report.subscriptions.iter().map(SubscriptionDetail::from).collect(),
		});

		Self {
			email: email.into(),
			has_access: report.has_access,
			access_type: report.access_type,
			is_student: report.is_student,
			is_subscriber: report.is_subscriber,
			student_info: report.student.as_ref().map(StudentInfo::from),
			subscription_info,
		}
	}
}

/// Entry point bundling the shared pipeline and every endpoint client.
pub struct Hotmart<T>
where
	T: ?Sized + HttpTransport,
{
	client: Arc<HotmartClient<T>>,
	students: Students<T>,
	subscriptions: Subscriptions<T>,
	pages: Pages<T>,
}
impl<T> Hotmart<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the facade over a caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Result<Self> {
		Ok(Self::from_client(Arc::new(HotmartClient::with_transport(config, transport)?)))
	}

	/// Builds the facade over an existing pipeline.
	pub fn from_client(client: Arc<HotmartClient<T>>) -> Self {
		Self {
			students: Students::new(client.clone()),
			subscriptions: Subscriptions::new(client.clone()),
			pages: Pages::new(client.clone()),
			client,
		}
	}

	/// Shared pipeline.
	pub fn client(&self) -> &Arc<HotmartClient<T>> {
		&self.client
	}

	/// Member endpoints.
	pub fn students(&self) -> &Students<T> {
		&self.students
	}

	/// Subscription endpoints.
	pub fn subscriptions(&self) -> &Subscriptions<T> {
		&self.subscriptions
	}

	/// Page endpoints.
	pub fn pages(&self) -> &Pages<T> {
		&self.pages
	}

	/// Looks `email` up as a club member and as a subscriber concurrently.
	pub async fn verify_access(&self, subdomain: &str, email: &str) -> Result<AccessReport> {
		let (student, subscription) = future::try_join(
			self.students.verify_access(subdomain, email),
			self.subscriptions.verify_access(email),
		)
		.await?;

		Ok(AccessReport::combine(student, subscription))
	}

	/// `email` holds at least one active subscription.
	pub async fn is_subscriber(&self, email: &str) -> Result<bool> {
		Ok(self.subscriptions.verify_access(email).await?.has_active_subscription)
	}

	/// `email` is an active club member.
	pub async fn is_student(&self, subdomain: &str, email: &str) -> Result<bool> {
		Ok(self.students.by_email(subdomain, email).await?.is_some_and(|s| s.is_active()))
	}

	/// `email` is an active buyer in the club.
	pub async fn is_paid_student(&self, subdomain: &str, email: &str) -> Result<bool> {
		Ok(self.students.by_email(subdomain, email).await?.is_some_and(|s| s.is_paid()))
	}

	/// `email` is a free club member.
	pub async fn is_free_student(&self, subdomain: &str, email: &str) -> Result<bool> {
		Ok(self.students.by_email(subdomain, email).await?.is_some_and(|s| s.is_free()))
	}

	/// `email` has access through either source.
	pub async fn has_active_access(&self, subdomain: &str, email: &str) -> Result<bool> {
		Ok(self.verify_access(subdomain, email).await?.has_access)
	}

	/// Flattened report for display.
	pub async fn access_summary(&self, subdomain: &str, email: &str) -> Result<AccessSummary> {
		let report = self.verify_access(subdomain, email).await?;

		Ok(AccessSummary::from_report(email, &report))
	}

	/// Access flag plus which records back it.
	pub async fn quick_check(&self, subdomain: &str, email: &str) -> Result<QuickCheck> {
		Ok(self.verify_access(subdomain, email).await?.quick_check())
	}
}
#[cfg(feature = "reqwest")]
impl Hotmart<ReqwestTransport> {
	/// Builds the facade with a fresh reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self::from_client(Arc::new(HotmartClient::new(config)?)))
	}
}
impl<T> Clone for Hotmart<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self::from_client(self.client.clone())
	}
}
impl<T> Debug for Hotmart<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Hotmart").field("client", &self.client).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn student(kind: &str, status: &str) -> Student {
		serde_json::from_value(serde_json::json!({
			"user_id": "u-1",
			"name": "Ana",
			"email": "ana@example.com",
			"role": "STUDENT",
			"status": status,
			"type": kind,
		}))
		.expect("Student fixture should deserialize.")
	}

	fn subscription(status: &str) -> Subscription {
		serde_json::from_value(serde_json::json!({
			"subscriber_code": "SUB1",
			"status": status,
			"accession_date": 1_700_000_000,
			"plan": { "name": "Monthly" },
			"product": { "name": "Course" },
		}))
		.expect("Subscription fixture should deserialize.")
	}

	#[test]
	fn subscription_outranks_membership() {
		let report = AccessReport::combine(
			StudentAccess::from_student(Some(student("BUYER", "ACTIVE"))),
			SubscriptionAccess::from_subscriptions(vec![subscription("ACTIVE")]),
		);

		assert!(report.is_student && report.is_subscriber && report.has_access);
		assert_eq!(report.access_type, AccessType::Subscription);
		assert_eq!(report.quick_check(), QuickCheck { has_access: true, kind: AccessKind::Both });
	}

	#[test]
	fn inactive_member_without_subscription_has_no_access() {
		let report = AccessReport::combine(
			StudentAccess::from_student(Some(student("BUYER", "BLOCKED"))),
			SubscriptionAccess::from_subscriptions(vec![subscription("CANCELLED_BY_CUSTOMER")]),
		);

		assert!(report.is_student);
		assert!(!report.is_subscriber);
		assert!(!report.has_access);
		assert_eq!(report.access_type, AccessType::None);
		assert_eq!(report.quick_check().kind, AccessKind::Student);
	}

	#[test]
	fn summary_flattens_report() {
		let report = AccessReport::combine(
			StudentAccess::from_student(None),
			SubscriptionAccess::from_subscriptions(vec![
				subscription("ACTIVE"),
				subscription("OVERDUE"),
			]),
		);
		let summary = AccessSummary::from_report("ana@example.com", &report);
		let info = summary.subscription_info.expect("Subscriptions should be summarized.");

		assert_eq!(summary.access_type, AccessType::Subscription);
		assert!(summary.student_info.is_none());
		assert_eq!((info.total, info.active), (2, 1));
		assert_eq!(info.subscriptions[0].plan_name, "Monthly");
		assert!(info.subscriptions[0].accession_date.is_some());
		assert_eq!(info.subscriptions[0].next_charge_date, None);
	}
}
