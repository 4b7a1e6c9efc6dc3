//! Staff listings and monthly slot availability on the admin API.

// crates.io
use serde_json::json;
use time::{Date, Month, format_description::well_known::Rfc3339, macros::format_description};
// self
use crate::{
	_prelude::*,
	auth::{LocationId, StaffId},
	error::UpstreamError,
	gateway::{Gateway, GraphqlTransport},
	graphql,
	obs::{self, OperationKind},
};

/// Staff member working at a location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
	/// Staff identifier.
	pub id: StaffId,
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Role held at the business.
	#[serde(default)]
	pub role: Option<NamedRef>,
	/// Profile picture.
	#[serde(default)]
	pub avatar: Option<Avatar>,
}

/// Reference carrying a display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
}

/// Avatar image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
	/// Image URL.
	#[serde(default)]
	pub url: Option<String>,
}

/// Availability search for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailabilityRequest {
	/// Month number, 1-12.
	pub month: u8,
	/// Calendar year.
	pub year: i32,
	/// Location to search.
	pub location_id: Option<LocationId>,
	/// Staff member to restrict the search to.
	pub staff_id: Option<StaffId>,
}
impl AvailabilityRequest {
	/// Returns the first and last day of the requested month.
	pub fn date_range(&self) -> Result<(Date, Date)> {
		let month = Month::try_from(self.month)
			.map_err(|_| Error::invalid_request("Month must be between 1 and 12"))?;
		let first = Date::from_calendar_date(self.year, month, 1)
			.map_err(|_| Error::invalid_request("Year is out of range"))?;
		let last = Date::from_calendar_date(self.year, month, month.length(self.year))
			.map_err(|_| Error::invalid_request("Year is out of range"))?;

		Ok((first, last))
	}
}

/// Open slot offered to the frontend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
	/// Synthetic identifier `slot-<date>-<index>`.
	pub id: String,
	/// Start instant as reported upstream.
	pub start_time: String,
}

/// Available slots keyed by UTC calendar date (`YYYY-MM-DD`).
pub type Availability = BTreeMap<String, Vec<AvailableSlot>>;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentSlot {
	start_time: String,
	#[serde(default)]
	available: bool,
}

#[derive(Deserialize)]
struct StaffData {
	location: Option<LocationStaff>,
}

#[derive(Deserialize)]
struct LocationStaff {
	#[serde(default)]
	staff: Vec<StaffMember>,
}

#[derive(Deserialize)]
struct SlotsData {
	location: Option<LocationSlots>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationSlots {
	#[serde(default)]
	appointment_slots: Vec<AppointmentSlot>,
}

impl<T> Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Lists staff at `location_id`; an unknown location yields an empty list.
	pub async fn location_staff(&self, location_id: Option<&LocationId>) -> Result<Vec<StaffMember>> {
		obs::observe(OperationKind::Staff, &graphql::LOCATION_STAFF, async {
			let data: StaffData =
				self.admin(&graphql::LOCATION_STAFF, json!({ "locationId": location_id })).await?;

			Ok(data.location.map(|location| location.staff).unwrap_or_default())
		})
		.await
	}

	/// Returns the available slots of the requested month grouped by day.
	pub async fn availability(&self, request: &AvailabilityRequest) -> Result<Availability> {
		obs::observe(OperationKind::Availability, &graphql::APPOINTMENT_SLOTS, async {
			let (start, end) = request.date_range()?;
			let (start_date, end_date) = (format_date(start)?, format_date(end)?);
			let data: SlotsData = self
				.admin(
					&graphql::APPOINTMENT_SLOTS,
					json!({
						"locationId": request.location_id,
						"staffId": request.staff_id,
						"startDate": start_date,
						"endDate": end_date,
					}),
				)
				.await?;
			let slots = data.location.map(|location| location.appointment_slots).unwrap_or_default();

			group_available_slots(&slots)
		})
		.await
	}
}

fn format_date(date: Date) -> Result<String> {
	date.format(format_description!("[year]-[month]-[day]"))
		.map_err(|e| Error::invalid_request(format!("Date cannot be formatted: {e}.")))
}

fn group_available_slots(slots: &[AppointmentSlot]) -> Result<Availability> {
	let mut availability = Availability::new();

	// Indices count every slot returned, available or not.
	for (index, slot) in slots.iter().enumerate() {
		if !slot.available {
			continue;
		}

		let start = OffsetDateTime::parse(&slot.start_time, &Rfc3339).map_err(|_| {
			UpstreamError::InvalidTimestamp { value: slot.start_time.clone() }
		})?;
		let date = format_date(start.to_offset(time::UtcOffset::UTC).date())?;

		availability
			.entry(date.clone())
			.or_default()
			.push(AvailableSlot { id: format!("slot-{date}-{index}"), start_time: slot.start_time.clone() });
	}

	Ok(availability)
}
