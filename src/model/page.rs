//! Club module pages and their dripping (scheduled release) configuration.

// std
use std::cmp::Ordering;
// self
use crate::_prelude::*;

/// Kind of content a page holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
	/// Regular lesson content.
	Content,
	/// Advertisement page.
	Advertisement,
	/// Quiz page.
	Quiz,
	/// Webinar page.
	Webinar,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Rule that releases a dripped page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiberationType {
	/// Released on a fixed date.
	ByDate,
	/// Released a number of days after purchase.
	ByDays,
	/// Released once a quiz is passed.
	ByQuiz,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Rule that expires access to a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpirationType {
	/// Expires a number of days after release.
	ByDays,
	/// Value not known to this client.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Rating bucket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rate {
	/// Star value.
	#[serde(default)]
	pub rate: f64,
	/// Number of votes with this value.
	#[serde(default)]
	pub total: u64,
}

/// Release rule of a dripping configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liberation {
	/// Release trigger (`type` on the wire).
	#[serde(rename = "type", default)]
	pub kind: LiberationType,
	/// Days after purchase, for [`LiberationType::ByDays`].
	#[serde(default)]
	pub liberation_days: Option<u32>,
	/// Release date as sent by the API, for [`LiberationType::ByDate`].
	#[serde(default)]
	pub liberation_date: Option<String>,
	/// Quiz page gating the release, for [`LiberationType::ByQuiz`].
	#[serde(default)]
	pub page_id: Option<String>,
}

/// Expiration rule of a dripping configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
	/// Expiration trigger (`type` on the wire).
	#[serde(rename = "type", default)]
	pub kind: ExpirationType,
	/// Days of access after release.
	#[serde(default)]
	pub duration_days: u32,
}

/// Club class a dripping rule applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
	/// Class identifier.
	pub id: String,
	/// Class name.
	#[serde(default)]
	pub name: String,
	/// Whether this is the club's default class.
	#[serde(default)]
	pub default_class: bool,
}

/// Scheduled release configuration of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrippingConfig {
	/// Release rule.
	#[serde(default)]
	pub liberation: Liberation,
	/// Optional expiration rule.
	#[serde(default)]
	pub expiration: Option<Expiration>,
	/// Classes the rule applies to.
	#[serde(default)]
	pub classes: Vec<ClassInfo>,
}

/// Flattened view of a [`DrippingConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrippingInfo {
	/// Release trigger.
	pub liberation_type: LiberationType,
	/// Days after purchase, when released by days.
	pub liberation_days: Option<u32>,
	/// Release date, when released by date.
	pub liberation_date: Option<String>,
	/// Days of access after release, when an expiration is configured.
	pub expiration_days: Option<u32>,
	/// Classes the rule applies to.
	pub classes: Vec<ClassInfo>,
}

/// Page inside a club module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
	/// Page identifier.
	pub page_id: String,
	/// Page title.
	#[serde(default)]
	pub name: String,
	/// Content kind (`type` on the wire).
	#[serde(rename = "type", default)]
	pub kind: PageType,
	/// Position inside the module.
	#[serde(default)]
	pub page_order: i64,
	/// Number of comments.
	#[serde(default)]
	pub total_comments: u64,
	/// Rating distribution.
	#[serde(default)]
	pub rates: Vec<Rate>,
	/// Average rating.
	#[serde(default)]
	pub rates_average: f64,
	/// Whether the page is visible to members.
	#[serde(default)]
	pub published: bool,
	/// Whether the page carries media.
	#[serde(default)]
	pub has_media: bool,
	/// Scheduled release rules.
	#[serde(default)]
	pub dripping_configs: Vec<DrippingConfig>,
}
impl Page {
	/// Page holds regular content.
	pub fn is_content(&self) -> bool {
		self.kind == PageType::Content
	}

	/// Page is an advertisement.
	pub fn is_advertisement(&self) -> bool {
		self.kind == PageType::Advertisement
	}

	/// Page is a quiz.
	pub fn is_quiz(&self) -> bool {
		self.kind == PageType::Quiz
	}

	/// Page is a webinar.
	pub fn is_webinar(&self) -> bool {
		self.kind == PageType::Webinar
	}

	/// Page is visible to members.
	pub fn is_published(&self) -> bool {
		self.published
	}

	/// Page carries media.
	pub fn has_media(&self) -> bool {
		self.has_media
	}

	/// Number of comments.
	pub fn comments(&self) -> u64 {
		self.total_comments
	}

	/// Average rating.
	pub fn rating(&self) -> f64 {
		self.rates_average
	}

	/// Position inside the module.
	pub fn order(&self) -> i64 {
		self.page_order
	}

	/// Projects every dripping configuration into a flat [`DrippingInfo`].
	pub fn dripping_info(&self) -> Vec<DrippingInfo> {
		self.dripping_configs
			.iter()
			.map(|config| DrippingInfo {
				liberation_type: config.liberation.kind,
				liberation_days: config.liberation.liberation_days,
				liberation_date: config.liberation.liberation_date.clone(),
				expiration_days: config.expiration.as_ref().map(|e| e.duration_days),
				classes: config.classes.clone(),
			})
			.collect()
	}
}

/// Pages of the given kind.
pub fn pages_by_type(pages: &[Page], kind: PageType) -> Vec<Page> {
	pages.iter().filter(|page| page.kind == kind).cloned().collect()
}

/// Published pages.
pub fn published_pages(pages: &[Page]) -> Vec<Page> {
	pages.iter().filter(|page| page.is_published()).cloned().collect()
}

/// Pages that carry media.
pub fn pages_with_media(pages: &[Page]) -> Vec<Page> {
	pages.iter().filter(|page| page.has_media()).cloned().collect()
}

/// Copy of `pages` sorted by module position.
pub fn sort_by_order(pages: &[Page]) -> Vec<Page> {
	let mut sorted = pages.to_vec();

	sorted.sort_by_key(Page::order);

	sorted
}

/// Copy of `pages` sorted by average rating; highest first when `descending`.
pub fn sort_by_rating(pages: &[Page], descending: bool) -> Vec<Page> {
	let mut sorted = pages.to_vec();

	sorted.sort_by(|a, b| {
		let ord: Ordering = a.rates_average.total_cmp(&b.rates_average);

		if descending { ord.reverse() } else { ord }
	});

	sorted
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn page(id: &str, kind: &str, order: i64, rating: f64, published: bool) -> Page {
		serde_json::from_value(serde_json::json!({
			"page_id": id,
			"name": id,
			"type": kind,
			"page_order": order,
			"total_comments": order * 2,
			"rates": [],
			"rates_average": rating,
			"published": published,
			"has_media": kind == "WEBINAR",
			"dripping_configs": [],
		}))
		.expect("Page fixture should deserialize.")
	}

	#[test]
	fn helpers_filter_and_sort() {
		let pages = vec![
			page("a", "CONTENT", 3, 4.5, true),
			page("b", "QUIZ", 1, 3.0, false),
			page("c", "WEBINAR", 2, 4.9, true),
			page("d", "SURVEY", 4, 1.0, true),
		];

		assert_eq!(pages_by_type(&pages, PageType::Quiz).len(), 1);
		assert_eq!(pages_by_type(&pages, PageType::Unknown)[0].page_id, "d");
		assert_eq!(published_pages(&pages).len(), 3);
		assert_eq!(pages_with_media(&pages)[0].page_id, "c");

		let by_order = sort_by_order(&pages).into_iter().map(|p| p.page_id).collect::<Vec<_>>();

		assert_eq!(by_order, ["b", "c", "a", "d"]);

		let by_rating =
			sort_by_rating(&pages, true).into_iter().map(|p| p.page_id).collect::<Vec<_>>();

		assert_eq!(by_rating, ["c", "a", "b", "d"]);

		let ascending =
			sort_by_rating(&pages, false).into_iter().map(|p| p.page_id).collect::<Vec<_>>();

		assert_eq!(ascending, ["d", "b", "a", "c"]);
	}

	#[test]
	fn dripping_info_flattens_configs() {
		let page: Page = serde_json::from_str(
			r#"{
				"page_id": "p1",
				"name": "Week 2",
				"type": "CONTENT",
				"page_order": 2,
				"total_comments": 0,
				"rates": [{"rate": 5, "total": 2}],
				"rates_average": 5,
				"published": true,
				"has_media": false,
				"dripping_configs": [{
					"liberation": {"type": "BY_DAYS", "liberation_days": 7},
					"expiration": {"type": "BY_DAYS", "duration_days": 30},
					"classes": [{"id": "c1", "name": "Default", "default_class": true}]
				}]
			}"#,
		)
		.expect("Page should deserialize.");
		let info = page.dripping_info();

		assert!(page.is_content());
		assert_eq!(info.len(), 1);
		assert_eq!(info[0].liberation_type, LiberationType::ByDays);
		assert_eq!(info[0].liberation_days, Some(7));
		assert_eq!(info[0].expiration_days, Some(30));
		assert!(info[0].classes[0].default_class);
	}
}
