//! Club members ("students"), their progress, and lesson completion records.

// self
use crate::{_prelude::*, model::common::from_unix_seconds};

/// Role a member holds inside a club.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentRole {
	/// Paying or imported student.
	Student,
	/// Student with free access.
	FreeStudent,
	/// Club owner.
	Owner,
	/// Club administrator.
	Admin,
	/// Content editor.
	ContentEditor,
	/// Community moderator.
	Moderator,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Hotmart Plus entitlement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlusAccess {
	/// No Plus entitlement.
	#[default]
	WithoutPlusAccess,
	/// Plus holder.
	Holder,
	/// Dependent of a Plus holder.
	Dependent,
	/// Plus holder with dependents.
	HolderWithDependents,
	/// Plus holder without dependents.
	HolderWithoutDependents,
	/// Value not known to this client.
	#[serde(other)]
	Unknown,
}

/// Access status of a member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
	/// Member can access the club.
	Active,
	/// Blocked by the platform.
	Blocked,
	/// Blocked by the club owner.
	BlockedByOwner,
	/// Payment overdue.
	Overdue,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// How the member entered the club.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentType {
	/// Purchased the product.
	Buyer,
	/// Imported by the owner.
	Imported,
	/// Free access.
	Free,
	/// Club owner.
	Owner,
	/// Guest access.
	Guest,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Engagement bucket computed by Hotmart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentEngagement {
	/// No engagement.
	None,
	/// Low engagement.
	Low,
	/// Medium engagement.
	Medium,
	/// High engagement.
	High,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Aggregate lesson progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
	/// Completion percentage (0-100).
	#[serde(default)]
	pub completed_percentage: f64,
	/// Total lessons.
	#[serde(default)]
	pub total: u32,
	/// Completed lessons.
	#[serde(default)]
	pub completed: u32,
}

/// Club member record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
	/// Member identifier.
	pub user_id: String,
	/// Engagement bucket.
	#[serde(default)]
	pub engagement: StudentEngagement,
	/// Display name.
	pub name: String,
	/// Login email.
	pub email: String,
	/// Last access, Unix seconds.
	#[serde(default)]
	pub last_access_date: Option<i64>,
	/// Club role.
	#[serde(default)]
	pub role: StudentRole,
	/// First access, Unix seconds.
	#[serde(default)]
	pub first_access_date: Option<i64>,
	/// Preferred locale (e.g. `pt_BR`).
	#[serde(default)]
	pub locale: String,
	/// Hotmart Plus entitlement.
	#[serde(default)]
	pub plus_access: PlusAccess,
	/// Aggregate lesson progress.
	#[serde(default)]
	pub progress: StudentProgress,
	/// Access status.
	#[serde(default)]
	pub status: StudentStatus,
	/// Purchase instant, Unix seconds.
	#[serde(default)]
	pub purchase_date: Option<i64>,
	/// Number of club accesses.
	#[serde(default)]
	pub access_count: u64,
	/// Whether the owner may remove the member.
	#[serde(default)]
	pub is_deletable: bool,
	/// Class the member belongs to.
	#[serde(default)]
	pub class_id: String,
	/// Entry type (`type` on the wire).
	#[serde(rename = "type", default)]
	pub kind: StudentType,
}
impl Student {
	/// Status is `ACTIVE`.
	pub fn is_active(&self) -> bool {
		self.status == StudentStatus::Active
	}

	/// Active buyer.
	pub fn is_subscriber(&self) -> bool {
		self.kind == StudentType::Buyer && self.is_active()
	}

	/// Holds a student or free-student role.
	pub fn is_student(&self) -> bool {
		matches!(self.role, StudentRole::Student | StudentRole::FreeStudent)
	}

	/// Free type or free-student role.
	pub fn is_free(&self) -> bool {
		self.kind == StudentType::Free || self.role == StudentRole::FreeStudent
	}

	/// Active buyer.
	pub fn is_paid(&self) -> bool {
		self.kind == StudentType::Buyer && self.is_active()
	}

	/// Holds the owner role.
	pub fn is_owner(&self) -> bool {
		self.role == StudentRole::Owner
	}

	/// Holds the admin role.
	pub fn is_admin(&self) -> bool {
		self.role == StudentRole::Admin
	}

	/// Holds the moderator role.
	pub fn is_moderator(&self) -> bool {
		self.role == StudentRole::Moderator
	}

	/// Holds the content-editor role.
	pub fn is_content_editor(&self) -> bool {
		self.role == StudentRole::ContentEditor
	}

	/// Has any Plus entitlement.
	pub fn has_plus_access(&self) -> bool {
		self.plus_access != PlusAccess::WithoutPlusAccess
	}

	/// Holds Plus (with or without dependents).
	pub fn is_plus_holder(&self) -> bool {
		matches!(
			self.plus_access,
			PlusAccess::Holder | PlusAccess::HolderWithDependents | PlusAccess::HolderWithoutDependents
		)
	}

	/// Is a Plus dependent.
	pub fn is_plus_dependent(&self) -> bool {
		self.plus_access == PlusAccess::Dependent
	}

	/// Blocked by the platform or by the owner.
	pub fn is_blocked(&self) -> bool {
		matches!(self.status, StudentStatus::Blocked | StudentStatus::BlockedByOwner)
	}

	/// Status is `OVERDUE`.
	pub fn is_overdue(&self) -> bool {
		self.status == StudentStatus::Overdue
	}

	/// Completion percentage.
	pub fn progress_percentage(&self) -> f64 {
		self.progress.completed_percentage
	}

	/// Completed lesson count from the aggregate progress.
	pub fn completed_lessons(&self) -> u32 {
		self.progress.completed
	}

	/// Total lesson count from the aggregate progress.
	pub fn total_lessons(&self) -> u32 {
		self.progress.total
	}

	/// Last access as a UTC instant.
	pub fn last_access(&self) -> Option<OffsetDateTime> {
		from_unix_seconds(self.last_access_date)
	}

	/// First access as a UTC instant.
	pub fn first_access(&self) -> Option<OffsetDateTime> {
		from_unix_seconds(self.first_access_date)
	}

	/// Purchase as a UTC instant.
	pub fn purchased_at(&self) -> Option<OffsetDateTime> {
		from_unix_seconds(self.purchase_date)
	}
}

/// Completion record for a single lesson.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
	/// Lesson page identifier.
	pub page_id: String,
	/// Lesson title.
	pub page_name: String,
	/// Module the lesson belongs to.
	pub module_name: String,
	/// Whether the module is marked as extra content.
	#[serde(default)]
	pub is_module_extra: bool,
	/// Whether the member completed the lesson.
	#[serde(default)]
	pub is_completed: bool,
	/// Completion instant, Unix seconds.
	#[serde(default)]
	pub completed_date: Option<i64>,
}

/// Lesson list returned by the progress endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLessons {
	/// Lessons in club order.
	#[serde(default)]
	pub lessons: Vec<Lesson>,
}
impl StudentLessons {
	/// Number of completed lessons.
	pub fn completed_count(&self) -> usize {
		self.lessons.iter().filter(|lesson| lesson.is_completed).count()
	}

	/// Number of lessons not yet completed.
	pub fn pending_count(&self) -> usize {
		self.lessons.iter().filter(|lesson| !lesson.is_completed).count()
	}
}
