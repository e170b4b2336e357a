//! Door exceptions, recurrence rules, and access schedule events.

// self
use crate::{
	_prelude::*,
	error::ValidationError,
	types::{DoorStatus, Frequency, Weekday},
	validate,
};

const ALL_DAY_START: &str = "00:00";
const ALL_DAY_END: &str = "23:59";

/// Repetition rule attached to a door exception.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
	/// Repetition frequency.
	pub frequency: Frequency,
	/// Repeat every `interval` periods.
	pub interval: u32,
	/// `HH:MM` start of each occurrence.
	pub start_time: String,
	/// Weekdays the rule applies to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub by_day: Option<Vec<Weekday>>,
	/// Month (`1..=12`), yearly rules only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub by_month: Option<u8>,
	/// Day of month (`1..=31`), monthly or yearly rules only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub by_month_day: Option<u8>,
	/// Week position (`1..=5`), monthly or yearly rules only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub by_set_pos: Option<u8>,
	/// `YYYY-MM-DD` dates skipped by the rule.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub excluded_dates: Option<Vec<String>>,
	/// `YYYY-MM-DD` last date; exclusive with `count`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub until: Option<String>,
	/// Number of occurrences; exclusive with `until`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<u32>,
}
impl RecurrenceRule {
	/// Creates a rule with only the required fields set.
	pub fn new(frequency: Frequency, interval: u32, start_time: impl Into<String>) -> Self {
		Self {
			frequency,
			interval,
			start_time: start_time.into(),
			by_day: None,
			by_month: None,
			by_month_day: None,
			by_set_pos: None,
			excluded_dates: None,
			until: None,
			count: None,
		}
	}

	/// Sets `by_day`.
	pub fn with_by_day(mut self, days: Vec<Weekday>) -> Self {
		self.by_day = Some(days);

		self
	}

	/// Sets `by_set_pos`.
	pub fn with_by_set_pos(mut self, pos: u8) -> Self {
		self.by_set_pos = Some(pos);

		self
	}

	/// Checks the rule against the recurrence schema.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let monthly_or_yearly = matches!(self.frequency, Frequency::Monthly | Frequency::Yearly);

		validate::parse_clock(&self.start_time, "recurrence_rule.start_time")?;

		if let Some(days) = &self.by_day {
			match self.frequency {
				Frequency::Daily => return Err(rule("by_day is not supported for DAILY")),
				Frequency::Weekly if days.is_empty() =>
					return Err(rule("by_day needs at least one value for WEEKLY")),
				Frequency::Monthly | Frequency::Yearly => {
					if self.by_set_pos.is_none() {
						return Err(rule(
							"by_set_pos is required with by_day for MONTHLY or YEARLY",
						));
					}
					if days.len() != 1 {
						return Err(rule("by_day takes exactly one value for MONTHLY or YEARLY"));
					}
				},
				Frequency::Weekly => (),
			}
		}
		if let Some(month) = self.by_month {
			if self.frequency != Frequency::Yearly {
				return Err(rule("by_month is only supported for YEARLY"));
			}

			validate::require_range(month.into(), "recurrence_rule.by_month", 1, 12)?;
		}
		if let Some(day) = self.by_month_day {
			if !monthly_or_yearly {
				return Err(rule("by_month_day is only supported for MONTHLY or YEARLY"));
			}
			if self.by_set_pos.is_some() {
				return Err(rule("only one of by_month_day or by_set_pos is allowed"));
			}

			validate::require_range(day.into(), "recurrence_rule.by_month_day", 1, 31)?;
		}
		if let Some(pos) = self.by_set_pos {
			validate::require_range(pos.into(), "recurrence_rule.by_set_pos", 1, 5)?;

			if !monthly_or_yearly {
				return Err(rule("by_set_pos is only supported for MONTHLY or YEARLY"));
			}
		}
		for date in self.excluded_dates.iter().flatten() {
			validate::parse_date(date, "recurrence_rule.excluded_dates")?;
		}
		if let Some(until) = &self.until {
			validate::parse_date(until, "recurrence_rule.until")?;
		}
		if self.count.is_some() && self.until.is_some() {
			return Err(rule("only one of count or until may be provided"));
		}

		Ok(())
	}
}

fn rule(reason: &str) -> ValidationError {
	ValidationError::invalid("recurrence_rule", reason)
}

/// One dated override on a door exception calendar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorException {
	/// `YYYY-MM-DD` date of the exception.
	pub date: String,
	/// Door state during the exception.
	pub door_status: DoorStatus,
	/// Whole-day exception; requires `access_controlled`.
	#[serde(default)]
	pub all_day_default: bool,
	/// `HH:MM` start, required unless all-day.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub start_time: Option<String>,
	/// `HH:MM` end, required unless all-day.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end_time: Option<String>,
	/// Require two badge-ins.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub double_badge: Option<bool>,
	/// Groups subject to double badge.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub double_badge_group_ids: Option<Vec<String>>,
	/// Keep the door locked until a member of the listed groups arrives.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_person_in: Option<bool>,
	/// Groups that satisfy first-person-in.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_person_in_group_ids: Option<Vec<String>>,
	/// Optional repetition.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub recurrence_rule: Option<RecurrenceRule>,
}
impl DoorException {
	/// Timed exception between `start_time` and `end_time`.
	pub fn timed(
		date: impl Into<String>,
		door_status: DoorStatus,
		start_time: impl Into<String>,
		end_time: impl Into<String>,
	) -> Self {
		Self {
			date: date.into(),
			door_status,
			all_day_default: false,
			start_time: Some(start_time.into()),
			end_time: Some(end_time.into()),
			double_badge: None,
			double_badge_group_ids: None,
			first_person_in: None,
			first_person_in_group_ids: None,
			recurrence_rule: None,
		}
	}

	/// All-day `access_controlled` exception.
	pub fn all_day(date: impl Into<String>) -> Self {
		Self {
			all_day_default: true,
			start_time: None,
			end_time: None,
			..Self::timed(date, DoorStatus::AccessControlled, ALL_DAY_START, ALL_DAY_END)
		}
	}

	/// Enables double badge for `group_ids`.
	pub fn with_double_badge(mut self, group_ids: Vec<String>) -> Self {
		self.double_badge = Some(true);
		self.double_badge_group_ids = Some(group_ids);

		self
	}

	/// Enables first-person-in for `group_ids`.
	pub fn with_first_person_in(mut self, group_ids: Vec<String>) -> Self {
		self.first_person_in = Some(true);
		self.first_person_in_group_ids = Some(group_ids);

		self
	}

	/// Attaches a recurrence rule.
	pub fn with_recurrence_rule(mut self, rule: RecurrenceRule) -> Self {
		self.recurrence_rule = Some(rule);

		self
	}

	/// Checks the exception against the door exception schema.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::parse_date(&self.date, "date")?;

		if self.double_badge == Some(true) && self.double_badge_group_ids.is_none() {
			return Err(exception("double_badge_group_ids is required when double_badge is true"));
		}
		if self.double_badge_group_ids.is_some() && self.double_badge != Some(true) {
			return Err(exception("double_badge must be true when double_badge_group_ids is set"));
		}

		if self.all_day_default {
			if self.door_status != DoorStatus::AccessControlled {
				return Err(exception("door_status must be access_controlled when all_day_default"));
			}
			if !blank_or(self.start_time.as_deref(), ALL_DAY_START) {
				return Err(exception("start_time must be 00:00 or absent when all_day_default"));
			}
			if !blank_or(self.end_time.as_deref(), ALL_DAY_END) {
				return Err(exception("end_time must be 23:59 or absent when all_day_default"));
			}
		} else {
			let start =
				self.start_time.as_deref().ok_or(ValidationError::Empty { field: "start_time" })?;
			let end = self.end_time.as_deref().ok_or(ValidationError::Empty { field: "end_time" })?;

			validate::parse_clock(start, "start_time")?;
			validate::parse_clock(end, "end_time")?;
		}

		if self.first_person_in == Some(true) && self.first_person_in_group_ids.is_none() {
			return Err(exception(
				"first_person_in_group_ids is required when first_person_in is true",
			));
		}
		if let Some(rule) = &self.recurrence_rule {
			rule.validate()?;
		}

		Ok(())
	}
}

fn blank_or(value: Option<&str>, expected: &str) -> bool {
	value.is_none_or(|v| v.is_empty() || v == expected)
}

fn exception(reason: &str) -> ValidationError {
	ValidationError::invalid("door exception", reason)
}

/// Weekly window during which an access level grants access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScheduleEvent {
	/// Always `access_granted`.
	pub door_status: String,
	/// `HH:MM` start.
	pub start_time: String,
	/// `HH:MM` end.
	pub end_time: String,
	/// Day the window applies to.
	pub weekday: Weekday,
	/// Server id, present on events read back from the API.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_schedule_event_id: Option<String>,
}
impl AccessScheduleEvent {
	/// Door status used by every schedule event.
	pub const ACCESS_GRANTED: &str = "access_granted";

	/// Creates a new event.
	pub fn new(
		start_time: impl Into<String>,
		end_time: impl Into<String>,
		weekday: Weekday,
	) -> Self {
		Self {
			door_status: Self::ACCESS_GRANTED.into(),
			start_time: start_time.into(),
			end_time: end_time.into(),
			weekday,
			access_schedule_event_id: None,
		}
	}

	/// Checks both clock times.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::parse_clock(&self.start_time, "start_time")?;
		validate::parse_clock(&self.end_time, "end_time")?;

		Ok(())
	}
}

/// Validates every exception, reporting the first failure with its position.
pub fn validate_exceptions(exceptions: &[DoorException]) -> Result<(), ValidationError> {
	for (index, exc) in exceptions.iter().enumerate() {
		exc.validate().map_err(|e| {
			ValidationError::invalid("exceptions", format!("at index {index}: {e}"))
		})?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn all_day_requires_access_controlled() {
		let mut exc = DoorException::all_day("2025-12-25");

		assert!(exc.validate().is_ok());

		exc.door_status = DoorStatus::Locked;

		assert!(exc.validate().is_err());
	}

	#[test]
	fn all_day_times_must_be_absent_or_day_bounds() {
		let mut exc = DoorException::all_day("2025-12-25");

		exc.start_time = Some("00:00".into());
		exc.end_time = Some("23:59".into());

		assert!(exc.validate().is_ok());

		exc.start_time = Some("08:00".into());

		assert!(exc.validate().is_err());

		exc.start_time = Some(String::new());
		exc.end_time = Some("17:00".into());

		assert!(exc.validate().is_err());
	}

	#[test]
	fn timed_exception_needs_both_times() {
		let mut exc = DoorException::timed("2025-01-02", DoorStatus::Unlocked, "08:00", "17:00");

		assert!(exc.validate().is_ok());

		exc.end_time = None;

		assert_eq!(exc.validate(), Err(ValidationError::Empty { field: "end_time" }));
	}

	#[test]
	fn group_ids_follow_their_flags() {
		let base = DoorException::timed("2025-01-02", DoorStatus::Locked, "08:00", "17:00");
		let mut exc = base.clone().with_double_badge(vec!["g1".into()]);

		assert!(exc.validate().is_ok());

		exc.double_badge = Some(false);

		assert!(exc.validate().is_err());

		let mut exc = base.with_first_person_in(vec!["g2".into()]);

		exc.first_person_in_group_ids = None;

		assert!(exc.validate().is_err());
	}

	#[test]
	fn recurrence_rule_frequency_constraints() {
		let weekly = RecurrenceRule::new(Frequency::Weekly, 1, "08:00")
			.with_by_day(vec![Weekday::Monday, Weekday::Friday]);

		assert!(weekly.validate().is_ok());
		assert!(
			RecurrenceRule::new(Frequency::Daily, 1, "08:00")
				.with_by_day(vec![Weekday::Monday])
				.validate()
				.is_err()
		);
		assert!(
			RecurrenceRule::new(Frequency::Weekly, 1, "08:00").with_by_day(vec![]).validate().is_err()
		);

		let monthly =
			RecurrenceRule::new(Frequency::Monthly, 1, "08:00").with_by_day(vec![Weekday::Tuesday]);

		assert!(monthly.validate().is_err());
		assert!(monthly.clone().with_by_set_pos(2).validate().is_ok());
		assert!(monthly.with_by_set_pos(6).validate().is_err());
	}

	#[test]
	fn recurrence_rule_field_exclusions() {
		let mut yearly = RecurrenceRule::new(Frequency::Yearly, 1, "08:00");

		yearly.by_month = Some(12);
		yearly.by_month_day = Some(31);

		assert!(yearly.validate().is_ok());

		yearly.by_set_pos = Some(1);

		assert!(yearly.validate().is_err());

		let mut weekly = RecurrenceRule::new(Frequency::Weekly, 1, "08:00");

		weekly.by_month = Some(1);

		assert!(weekly.validate().is_err());

		let mut counted = RecurrenceRule::new(Frequency::Daily, 2, "08:00");

		counted.count = Some(3);
		counted.until = Some("2025-06-01".into());

		assert!(counted.validate().is_err());

		counted.count = None;
		counted.excluded_dates = Some(vec!["2025-13-01".into()]);

		assert!(counted.validate().is_err());
	}

	#[test]
	fn exceptions_serialize_without_absent_fields() {
		let value = serde_json::to_value(DoorException::all_day("2025-12-25"))
			.expect("Exception should serialize.");

		assert_eq!(
			value,
			json!({"date": "2025-12-25", "door_status": "access_controlled", "all_day_default": true})
		);
	}
}
