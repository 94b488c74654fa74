//! Club member listing, lesson progress, and access checks.

// self
use crate::{
	_prelude::*,
	api::{self, PAGE_SIZE},
	client::{HotmartClient, RequestOptions},
	http::HttpTransport,
	model::{ApiResponse, Student, StudentLessons, StudentStatus},
};

const USERS_PATH: &str = "/club/api/v1/users";

/// Filters accepted by the member listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetStudentsOptions {
	/// Club subdomain.
	pub subdomain: String,
	/// Restricts the listing to one email.
	pub email: Option<String>,
	/// Page size.
	pub max_results: Option<u32>,
	/// Cursor from a previous page.
	pub page_token: Option<String>,
}
impl GetStudentsOptions {
	/// Lists every member of `subdomain`.
	pub fn new(subdomain: impl Into<String>) -> Self {
		Self { subdomain: subdomain.into(), ..Default::default() }
	}

	/// Filters by email.
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());

		self
	}

	/// Sets the page size.
	pub fn with_max_results(mut self, max_results: u32) -> Self {
		self.max_results = Some(max_results);

		self
	}

	/// Continues from a previous page.
	pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
		self.page_token = Some(page_token.into());

		self
	}

	fn to_request_options(&self) -> RequestOptions {
		RequestOptions::new()
			.query("subdomain", &self.subdomain)
			.query_opt("email", self.email.as_deref().filter(|v| !v.is_empty()))
			.query_opt("max_results", self.max_results.filter(|v| *v > 0))
			.query_opt("page_token", self.page_token.as_deref().filter(|v| !v.is_empty()))
	}
}

/// How a member's access was granted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StudentAccessType {
	/// Active buyer.
	Paid,
	/// Free member.
	Free,
	/// Neither paid nor free.
	#[default]
	None,
}
impl StudentAccessType {
	/// Classifies a member record.
	pub fn of(student: &Student) -> Self {
		if student.is_paid() {
			Self::Paid
		} else if student.is_free() {
			Self::Free
		} else {
			Self::None
		}
	}

	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Paid => "paid",
			Self::Free => "free",
			Self::None => "none",
		}
	}
}
impl Display for StudentAccessType {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result of [`Students::verify_access`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentAccess {
	/// Member exists and is active.
	pub has_access: bool,
	/// Matching member record.
	pub student: Option<Student>,
	/// How access was granted.
	pub access_type: StudentAccessType,
	/// Member status, when a record was found.
	pub status: Option<StudentStatus>,
}
impl StudentAccess {
	/// Builds the access result for an optional member record.
	pub fn from_student(student: Option<Student>) -> Self {
		match student {
			Some(student) => Self {
				has_access: student.is_active(),
				access_type: StudentAccessType::of(&student),
				status: Some(student.status),
				student: Some(student),
			},
			None => Self::default(),
		}
	}
}

/// Client for `/club/api/v1/users`.
pub struct Students<T>
where
	T: ?Sized + HttpTransport,
{
	client: Arc<HotmartClient<T>>,
}
impl<T> Students<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates the endpoint client over a shared pipeline.
	pub fn new(client: Arc<HotmartClient<T>>) -> Self {
		Self { client }
	}

	/// Lists one page of members.
	pub async fn list(&self, options: &GetStudentsOptions) -> Result<ApiResponse<Student>> {
		self.client.get(USERS_PATH, options.to_request_options()).await
	}

	/// Fetches the lesson completion records of one member.
	pub async fn progress(&self, subdomain: &str, user_id: &str) -> Result<StudentLessons> {
		self.client
			.get(
				&format!("{USERS_PATH}/{user_id}/lessons"),
				RequestOptions::new().query("subdomain", subdomain),
			)
			.await
	}

	/// Finds a member by email, comparing case-insensitively.
	pub async fn by_email(&self, subdomain: &str, email: &str) -> Result<Option<Student>> {
		let page = self.list(&GetStudentsOptions::new(subdomain).with_email(email)).await?;

		Ok(page.items.into_iter().find(|student| student.email.eq_ignore_ascii_case(email)))
	}

	/// Finds a member by id within the first page of the listing.
	pub async fn by_id(&self, subdomain: &str, user_id: &str) -> Result<Option<Student>> {
		let page = self.list(&GetStudentsOptions::new(subdomain)).await?;

		Ok(page.items.into_iter().find(|student| student.user_id == user_id))
	}

	/// Number of lessons the member completed.
	pub async fn completed_lessons(&self, subdomain: &str, user_id: &str) -> Result<usize> {
		Ok(self.progress(subdomain, user_id).await?.completed_count())
	}

	/// Number of lessons the member has not completed.
	pub async fn pending_lessons(&self, subdomain: &str, user_id: &str) -> Result<usize> {
		Ok(self.progress(subdomain, user_id).await?.pending_count())
	}

	/// Looks up `email` and reports whether the member has access.
	pub async fn verify_access(&self, subdomain: &str, email: &str) -> Result<StudentAccess> {
		Ok(StudentAccess::from_student(self.by_email(subdomain, email).await?))
	}

	/// Every active member, walking all pages.
	pub async fn all_active(&self, subdomain: &str) -> Result<Vec<Student>> {
		let students = api::collect_pages(|page_token| {
			let mut options = GetStudentsOptions::new(subdomain).with_max_results(PAGE_SIZE);

			options.page_token = page_token;

			async move { self.list(&options).await }
		})
		.await?;

		Ok(students.into_iter().filter(Student::is_active).collect())
	}

	/// Every active buyer.
	pub async fn all_subscribers(&self, subdomain: &str) -> Result<Vec<Student>> {
		Ok(self.all_active(subdomain).await?.into_iter().filter(Student::is_subscriber).collect())
	}

	/// Every active free member.
	pub async fn all_free_students(&self, subdomain: &str) -> Result<Vec<Student>> {
		Ok(self.all_active(subdomain).await?.into_iter().filter(Student::is_free).collect())
	}
}
impl<T> Clone for Students<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<T> Debug for Students<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Students").field("client", &self.client).finish()
	}
}
