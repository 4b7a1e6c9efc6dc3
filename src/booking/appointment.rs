//! Appointment history and appointment requests.

// crates.io
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	auth::{ClientId, ClientToken, LocationId},
	booking::{NewClient, non_blank},
	gateway::{Gateway, GraphqlTransport},
	graphql::{self, Connection},
	obs::{self, OperationKind},
};

const FIRST_AVAILABLE_STAFF: &str = "first-available";

/// Appointment as exposed to the frontend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
	/// Appointment identifier.
	pub id: String,
	/// Start instant as reported upstream (ISO 8601).
	#[serde(default)]
	pub start_at: Option<String>,
	/// End instant as reported upstream (ISO 8601).
	#[serde(default)]
	pub end_at: Option<String>,
	/// Lifecycle state, when selected.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Booked services.
	#[serde(default)]
	pub appointment_services: Vec<AppointmentService>,
	/// Location the appointment takes place at.
	#[serde(default)]
	pub location: Option<LocationSummary>,
}

/// Service line of an appointment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentService {
	/// Staff member performing the service.
	#[serde(default)]
	pub staff: Option<StaffSummary>,
	/// Service booked.
	#[serde(default)]
	pub service: Option<ServiceSummary>,
}

/// Compact staff reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary {
	/// Staff identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
}

/// Compact service reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
	/// Service identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Service name.
	#[serde(default)]
	pub name: Option<String>,
}

/// Compact location reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
	/// Location identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Location name.
	#[serde(default)]
	pub name: Option<String>,
}

/// Appointment request submitted by the booking form.
///
/// When `client_id` is absent, a client is created first from the name and email fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
	/// Existing client, if known.
	#[serde(default)]
	pub client_id: Option<String>,
	/// Given name for a new client.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name for a new client.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Email for a new client.
	#[serde(default)]
	pub email: Option<String>,
	/// Phone for a new client.
	#[serde(default)]
	pub phone: Option<String>,
	/// Treatment the client asked for.
	#[serde(default)]
	pub treatment_type: Option<String>,
	/// Location to book at.
	#[serde(default)]
	pub location_id: Option<String>,
	/// Preferred staff member or `first-available`.
	#[serde(default)]
	pub staff_id: Option<String>,
	/// Requested start instant.
	#[serde(default)]
	pub start_time: Option<String>,
	/// Whether the client accepts another time.
	#[serde(default)]
	pub is_flexible: bool,
}
impl AppointmentRequest {
	/// Renders the free-text notes attached to the appointment.
	///
	/// The treatment segment always leads, left empty when no treatment was chosen.
	pub fn notes(&self) -> String {
		let treatment = non_blank(self.treatment_type.as_deref()).unwrap_or_default();
		let mut parts = vec![format!("Treatment requested: {treatment}")];

		if let Some(staff) = non_blank(self.staff_id.as_deref())
			.filter(|staff| *staff != FIRST_AVAILABLE_STAFF)
		{
			parts.push(format!("Preferred staff: {staff}"));
		}
		if self.is_flexible {
			parts.push("Flexible timing".to_owned());
		}

		parts.join(", ")
	}

	fn new_client(&self) -> Option<NewClient> {
		let (Some(first_name), Some(last_name), Some(email)) = (
			non_blank(self.first_name.as_deref()),
			non_blank(self.last_name.as_deref()),
			non_blank(self.email.as_deref()),
		) else {
			return None;
		};

		Some(NewClient {
			first_name: first_name.to_owned(),
			last_name: last_name.to_owned(),
			email: email.to_owned(),
			phone: self.phone.clone(),
		})
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentHistoryData {
	my_appointments: Connection<Appointment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAppointmentData {
	create_appointment: CreateAppointmentPayload,
}

#[derive(Deserialize)]
struct CreateAppointmentPayload {
	appointment: Appointment,
}

impl<T> Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Returns the five most recent appointments of the client behind `token`.
	pub async fn appointment_history(&self, token: Option<&ClientToken>) -> Result<Vec<Appointment>> {
		obs::observe(OperationKind::AppointmentHistory, &graphql::APPOINTMENT_HISTORY, async {
			let data: AppointmentHistoryData =
				self.client(&graphql::APPOINTMENT_HISTORY, Value::Null, token).await?;

			Ok(data.my_appointments.into_nodes())
		})
		.await
	}

	/// Books an appointment, creating the client first when only contact details are given.
	pub async fn create_appointment(&self, request: &AppointmentRequest) -> Result<Appointment> {
		obs::observe(OperationKind::CreateAppointment, &graphql::CREATE_APPOINTMENT, async {
			let location_id = LocationId::new(request.location_id.as_deref().unwrap_or_default())?;
			let start_at = non_blank(request.start_time.as_deref())
				.ok_or_else(|| Error::invalid_request("Start time required"))?;
			let client_id = match non_blank(request.client_id.as_deref()) {
				Some(id) => ClientId::new(id)?,
				None => {
					let client = request.new_client().ok_or_else(|| {
						Error::invalid_request(
							"Client ID or first name, last name, and email required",
						)
					})?;

					self.create_client(&client).await?.id
				},
			};
			let data: CreateAppointmentData = self
				.admin(
					&graphql::CREATE_APPOINTMENT,
					json!({
						"input": {
							"clientId": client_id,
							"locationId": location_id,
							"startAt": start_at,
							"notes": request.notes(),
						}
					}),
				)
				.await?;

			Ok(data.create_appointment.appointment)
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request() -> AppointmentRequest {
		AppointmentRequest {
			treatment_type: Some("Lip Filler".into()),
			location_id: Some("urn:blvd:Location:1".into()),
			start_time: Some("2025-03-10T15:00:00Z".into()),
			..Default::default()
		}
	}

	#[test]
	fn notes_mention_treatment_only_by_default() {
		assert_eq!(request().notes(), "Treatment requested: Lip Filler");
	}

	#[test]
	fn notes_include_preferred_staff_and_flexibility() {
		let mut req = request();

		req.staff_id = Some("urn:blvd:Staff:7".into());
		req.is_flexible = true;

		assert_eq!(
			req.notes(),
			"Treatment requested: Lip Filler, Preferred staff: urn:blvd:Staff:7, Flexible timing"
		);
	}

	#[test]
	fn first_available_staff_is_not_a_preference() {
		let mut req = request();

		req.staff_id = Some(FIRST_AVAILABLE_STAFF.into());

		assert_eq!(req.notes(), "Treatment requested: Lip Filler");
	}

	#[test]
	fn notes_lead_with_treatment_even_when_missing() {
		let req = AppointmentRequest {
			staff_id: Some("urn:blvd:Staff:7".into()),
			is_flexible: true,
			..Default::default()
		};

		assert_eq!(req.notes(), "Treatment requested: , Preferred staff: urn:blvd:Staff:7, Flexible timing");
		assert!(AppointmentRequest::default().notes().starts_with("Treatment requested:"));
	}

	#[test]
	fn new_client_needs_names_and_email() {
		let mut req = request();

		req.first_name = Some("Ada".into());
		req.last_name = Some("Lovelace".into());

		assert!(req.new_client().is_none());

		req.email = Some("ada@example.com".into());

		let client = req.new_client().expect("Complete contact details build a client.");

		assert_eq!(client.email, "ada@example.com");
	}

	#[test]
	fn history_nodes_parse_nested_services() {
		let data: AppointmentHistoryData = serde_json::from_value(json!({
			"myAppointments": { "edges": [{ "node": {
				"id": "urn:blvd:Appointment:1",
				"startAt": "2025-03-10T15:00:00Z",
				"endAt": "2025-03-10T16:00:00Z",
				"appointmentServices": [{
					"staff": { "id": "s1", "firstName": "Grace", "lastName": "Hopper" },
					"service": { "id": "svc1", "name": "Botox" }
				}],
				"location": { "id": "l1", "name": "SoHo" }
			}}]}
		}))
		.expect("History should parse.");
		let appointments = data.my_appointments.into_nodes();

		assert_eq!(appointments.len(), 1);
		assert_eq!(
			appointments[0].appointment_services[0].service.as_ref().and_then(|s| s.name.as_deref()),
			Some("Botox")
		);
	}
}
