//! Recurring payment subscriptions, their summaries, and the bodies of subscription actions.

// self
use crate::{_prelude::*, model::common::from_unix_seconds};

/// Lifecycle status of a subscription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
	/// Paid and current.
	Active,
	/// No longer charged.
	Inactive,
	/// Charge delayed.
	Delayed,
	/// Cancelled by the subscriber.
	CancelledByCustomer,
	/// Cancelled by the producer.
	CancelledBySeller,
	/// Cancelled by Hotmart.
	CancelledByAdmin,
	/// Created, first charge pending.
	Started,
	/// Payment overdue.
	Overdue,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}
impl SubscriptionStatus {
	/// Every cancelled status.
	pub const CANCELLED: [Self; 3] =
		[Self::CancelledByCustomer, Self::CancelledBySeller, Self::CancelledByAdmin];

	/// Wire name of the status.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Active => "ACTIVE",
			Self::Inactive => "INACTIVE",
			Self::Delayed => "DELAYED",
			Self::CancelledByCustomer => "CANCELLED_BY_CUSTOMER",
			Self::CancelledBySeller => "CANCELLED_BY_SELLER",
			Self::CancelledByAdmin => "CANCELLED_BY_ADMIN",
			Self::Started => "STARTED",
			Self::Overdue => "OVERDUE",
			Self::Unknown => "UNKNOWN",
		}
	}

	/// Any of the cancelled statuses.
	pub fn is_cancelled(self) -> bool {
		Self::CANCELLED.contains(&self)
	}
}
impl Display for SubscriptionStatus {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How a recurrence was billed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingType {
	/// Regular subscription charge.
	Subscription,
	/// Smart installment.
	SmartInstallment,
	/// Smart recovery of a failed charge.
	SmartRecovery,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Subscription plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
	/// Plan name.
	#[serde(default)]
	pub name: String,
	/// Plan identifier.
	#[serde(default)]
	pub id: u64,
	/// Days between charges.
	#[serde(default)]
	pub recurrency_period: u32,
	/// Maximum number of charges, when bounded.
	#[serde(default)]
	pub max_charge_cycles: Option<u32>,
}

/// Plan as reported by the summary endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
	/// Plan name.
	#[serde(default)]
	pub name: String,
	/// Days between charges.
	#[serde(default)]
	pub recurrency_period: u32,
}

/// Product the subscription belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Product identifier.
	#[serde(default)]
	pub id: u64,
	/// Product name.
	#[serde(default)]
	pub name: String,
	/// Product ucode.
	#[serde(default)]
	pub ucode: Option<String>,
}

/// Charged amount.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
	/// Amount.
	#[serde(default)]
	pub value: f64,
	/// ISO currency code.
	#[serde(default)]
	pub currency_code: String,
}

/// Subscriber contact data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
	/// Full name.
	#[serde(default)]
	pub name: String,
	/// Email address.
	#[serde(default)]
	pub email: String,
	/// Subscriber ucode.
	#[serde(default)]
	pub ucode: Option<String>,
	/// Numeric identifier.
	#[serde(default)]
	pub id: Option<u64>,
	/// Phone number.
	#[serde(default)]
	pub phone: Option<String>,
}

/// Subscription record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
	/// Subscriber code used by the action endpoints.
	pub subscriber_code: String,
	/// Numeric identifier.
	#[serde(default)]
	pub subscription_id: u64,
	/// Lifecycle status.
	#[serde(default)]
	pub status: SubscriptionStatus,
	/// Accession instant, Unix seconds.
	#[serde(default)]
	pub accession_date: Option<i64>,
	/// End of access, Unix seconds.
	#[serde(default)]
	pub end_accession_date: Option<i64>,
	/// Request instant, Unix seconds.
	#[serde(default)]
	pub request_date: Option<i64>,
	/// Next charge, Unix seconds.
	#[serde(default)]
	pub date_next_charge: Option<i64>,
	/// Whether the subscription is in its trial period.
	#[serde(default)]
	pub trial: bool,
	/// Originating transaction.
	#[serde(default)]
	pub transaction: Option<String>,
	/// Plan.
	#[serde(default)]
	pub plan: Plan,
	/// Product.
	#[serde(default)]
	pub product: Product,
	/// Price, when reported.
	#[serde(default)]
	pub price: Option<Price>,
	/// Subscriber.
	#[serde(default)]
	pub subscriber: Subscriber,
}
impl Subscription {
	/// Status is `ACTIVE`.
	pub fn is_active(&self) -> bool {
		self.status == SubscriptionStatus::Active
	}

	/// Status is `INACTIVE`.
	pub fn is_inactive(&self) -> bool {
		self.status == SubscriptionStatus::Inactive
	}

	/// Cancelled by the customer, the seller, or an admin.
	pub fn is_cancelled(&self) -> bool {
		self.status.is_cancelled()
	}

	/// Status is `OVERDUE`.
	pub fn is_overdue(&self) -> bool {
		self.status == SubscriptionStatus::Overdue
	}

	/// In its trial period.
	pub fn is_trial(&self) -> bool {
		self.trial
	}

	/// Accession as a UTC instant.
	pub fn accession(&self) -> Option<OffsetDateTime> {
		from_unix_seconds(self.accession_date)
	}

	/// End of access as a UTC instant.
	pub fn end_accession(&self) -> Option<OffsetDateTime> {
		from_unix_seconds(self.end_accession_date)
	}

	/// Next charge as a UTC instant.
	pub fn next_charge(&self) -> Option<OffsetDateTime> {
		from_unix_seconds(self.date_next_charge)
	}
}

/// Most recent charge of a subscription.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRecurrency {
	/// Recurrence number.
	#[serde(default)]
	pub number: u32,
	/// Charge request instant, Unix seconds.
	#[serde(default)]
	pub request_date: Option<i64>,
	/// Charge status as reported upstream.
	#[serde(default)]
	pub status: String,
	/// Transaction number.
	#[serde(default)]
	pub transaction_number: u64,
	/// Billing type.
	#[serde(default)]
	pub billing_type: BillingType,
}

/// Charge that has not been paid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpaidRecurrency {
	/// Recurrence number.
	#[serde(default)]
	pub number: u32,
	/// Charge instant, Unix seconds.
	#[serde(default)]
	pub charge_date: Option<i64>,
}

/// Offer a subscription was sold under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
	/// Offer code.
	pub code: String,
}

/// Subscription record returned by the summary endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSummary {
	/// Subscriber code.
	pub subscriber_code: String,
	/// Numeric identifier.
	#[serde(default)]
	pub subscription_id: u64,
	/// Lifecycle status.
	#[serde(default)]
	pub status: SubscriptionStatus,
	/// Number of paid recurrences.
	#[serde(default)]
	pub lifetime: u32,
	/// Accession instant, Unix seconds.
	#[serde(default)]
	pub accession_date: Option<i64>,
	/// End of access, Unix seconds.
	#[serde(default)]
	pub end_accession_date: Option<i64>,
	/// Whether the subscription is in its trial period.
	#[serde(default)]
	pub trial: bool,
	/// Plan.
	#[serde(default)]
	pub plan: PlanSummary,
	/// Product.
	#[serde(default)]
	pub product: Product,
	/// Offer, when reported.
	#[serde(default)]
	pub offer: Option<Offer>,
	/// Last charge.
	#[serde(default)]
	pub last_recurrency: Option<LastRecurrency>,
	/// Charges still unpaid.
	#[serde(default)]
	pub unpaid_recurrencies: Vec<UnpaidRecurrency>,
	/// Subscriber.
	#[serde(default)]
	pub subscriber: Subscriber,
}

/// Body of the bulk cancel endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelSubscriptionRequest {
	/// Subscriber codes to cancel.
	pub subscriber_code: Vec<String>,
	/// Whether Hotmart notifies the subscribers by email.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub send_mail: Option<bool>,
}

/// Body of the bulk reactivate endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactivateSubscriptionRequest {
	/// Subscriber codes to reactivate.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subscriber_code: Option<Vec<String>>,
	/// Whether to charge immediately.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub charge: Option<bool>,
}

/// Body of the billing-day change endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBillingDayRequest {
	/// New day of month for charges (1-31).
	pub due_day: u8,
}

/// Subscription that an action succeeded on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessSubscriptionAction {
	/// Resulting status.
	#[serde(default)]
	pub status: SubscriptionStatus,
	/// Subscriber code.
	pub subscriber_code: String,
	/// Creation date as sent by the API.
	#[serde(default)]
	pub creation_date: String,
	/// Current recurrence number.
	#[serde(default)]
	pub current_recurrence: Option<u32>,
	/// Last recurrence date as sent by the API.
	#[serde(default)]
	pub date_last_recurrence: Option<String>,
	/// Next charge date as sent by the API.
	#[serde(default)]
	pub date_next_charge: Option<String>,
	/// Billing day of month.
	#[serde(default)]
	pub due_day: Option<u8>,
	/// Trial period in days.
	#[serde(default)]
	pub trial_period: Option<u32>,
	/// Unit of `interval_between_charges`.
	#[serde(default)]
	pub interval_type_between_charges: Option<String>,
	/// Interval between charges.
	#[serde(default)]
	pub interval_between_charges: u32,
	/// Maximum number of charges, when bounded.
	#[serde(default)]
	pub max_charge_cycles: Option<u32>,
	/// Activation date as sent by the API.
	#[serde(default)]
	pub activation_date: Option<String>,
	/// Subscriber.
	#[serde(default)]
	pub shopper: Subscriber,
}

/// Subscription that an action failed on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailSubscriptionAction {
	/// Status at the time of the failure.
	#[serde(default)]
	pub status: SubscriptionStatus,
	/// Failure reason.
	#[serde(default)]
	pub error: String,
	/// Subscriber code.
	pub subscriber_code: String,
	/// Creation date as sent by the API.
	#[serde(default)]
	pub creation_date: String,
	/// Interval between charges.
	#[serde(default)]
	pub interval_between_charges: u32,
	/// Subscriber.
	#[serde(default)]
	pub shopper: Subscriber,
}

/// Outcome of a cancel or reactivate action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionActionResponse {
	/// Subscriptions the action was applied to.
	#[serde(default)]
	pub success_subscriptions: Vec<SuccessSubscriptionAction>,
	/// Subscriptions the action was rejected for.
	#[serde(default)]
	pub fail_subscriptions: Vec<FailSubscriptionAction>,
}
impl SubscriptionActionResponse {
	/// Returns `true` when no subscription failed.
	pub fn all_succeeded(&self) -> bool {
		self.fail_subscriptions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	fn subscription(status: &str) -> Subscription {
		serde_json::from_value(serde_json::json!({
			"subscriber_code": "SUB1",
			"subscription_id": 42,
			"status": status,
			"accession_date": 1_700_000_000,
			"date_next_charge": 0,
			"trial": true,
			"plan": { "name": "Monthly", "id": 7, "recurrency_period": 30 },
			"product": { "id": 9, "name": "Course" },
			"subscriber": { "name": "Ana", "email": "ana@example.com" },
		}))
		.expect("Subscription fixture should deserialize.")
	}

	#[test]
	fn status_predicates() {
		assert!(subscription("ACTIVE").is_active());
		assert!(subscription("INACTIVE").is_inactive());
		assert!(subscription("OVERDUE").is_overdue());

		for status in ["CANCELLED_BY_CUSTOMER", "CANCELLED_BY_SELLER", "CANCELLED_BY_ADMIN"] {
			assert!(subscription(status).is_cancelled(), "{status} should count as cancelled.");
		}

		let odd = subscription("PAUSED");

		assert_eq!(odd.status, SubscriptionStatus::Unknown);
		assert!(!odd.is_active() && !odd.is_cancelled());
	}

	#[test]
	fn dates_convert_from_unix_seconds() {
		let sub = subscription("ACTIVE");

		assert!(sub.is_trial());
		assert_eq!(sub.accession(), Some(datetime!(2023-11-14 22:13:20 UTC)));
		assert_eq!(sub.end_accession(), None);
		assert_eq!(sub.next_charge(), None);
	}

	#[test]
	fn request_bodies_skip_unset_fields() {
		let reactivate = ReactivateSubscriptionRequest { subscriber_code: None, charge: Some(true) };

		assert_eq!(
			serde_json::to_value(reactivate).expect("Body should serialize."),
			serde_json::json!({ "charge": true }),
		);

		let cancel =
			CancelSubscriptionRequest { subscriber_code: vec!["A".into(), "B".into()], send_mail: None };

		assert_eq!(
			serde_json::to_value(cancel).expect("Body should serialize."),
			serde_json::json!({ "subscriber_code": ["A", "B"] }),
		);
	}

	#[test]
	fn status_wire_names_match_serde() {
		for status in SubscriptionStatus::CANCELLED {
			assert_eq!(
				serde_json::to_value(status).expect("Status should serialize."),
				serde_json::Value::String(status.as_str().to_owned()),
			);
		}
	}
}
