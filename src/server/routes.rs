//! Route table and handlers.

// crates.io
use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde_json::{Value, json};
use time::format_description::well_known::Rfc3339;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
// self
use crate::{
	_prelude::*,
	auth::{CartId, ClientId, ClientToken, LocationId, StaffId},
	booking::{AppointmentRequest, AvailabilityRequest, BookingOperation, ClientLookup, non_blank},
	server::AppState,
};

const APPOINTMENT_SUBMITTED: &str = "Appointment request submitted successfully";
const BEARER_PREFIX: &str = "Bearer ";

/// Builds the router with permissive CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/api/health", get(health))
		.route("/api/lookup-client", post(lookup_client))
		.route("/api/generate-token", post(generate_token))
		.route("/api/authenticate-client", post(authenticate_client))
		.route("/api/booking", post(booking))
		.route("/api/client-membership", post(client_membership))
		.route("/api/appointment-history", post(appointment_history))
		.route("/api/staff", post(staff))
		.route("/api/availability", post(availability))
		.route("/api/create-booking", post(create_booking))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

/// JSON error envelope returned by every route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
	/// Caller-facing message, or the route's failure label for server errors.
	pub error: String,
	/// Underlying failure, present on server errors only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
}

/// Handler failure rendered as [`ErrorBody`].
#[derive(Clone, Debug)]
pub struct ApiError {
	/// Response status.
	pub status: StatusCode,
	/// Response body.
	pub body: ErrorBody,
}
impl ApiError {
	/// 400 carrying `message`.
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self { status: StatusCode::BAD_REQUEST, body: ErrorBody { error: message.into(), details: None } }
	}

	/// 401 for requests without a bearer token.
	pub fn unauthorized() -> Self {
		Self {
			status: StatusCode::UNAUTHORIZED,
			body: ErrorBody { error: "Authorization token required".into(), details: None },
		}
	}

	/// Classifies `error`: caller mistakes become 400, everything else a 500 labeled `route`.
	pub fn from_error(route: &'static str, error: Error) -> Self {
		if error.is_client_error() {
			return Self::bad_request(error.to_string());
		}

		tracing::error!(route, error = %error, "Request failed.");

		Self::internal(route, error.to_string())
	}

	/// 500 labeled `route` with `details`.
	pub fn internal(route: &'static str, details: impl Into<String>) -> Self {
		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			body: ErrorBody { error: route.into(), details: Some(details.into()) },
		}
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::bad_request(rejection.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(self.body)).into_response()
	}
}

type Payload<T> = Result<Json<T>, JsonRejection>;
type ApiResult = Result<Json<Value>, ApiError>;

/// Body carrying a single client identifier.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIdBody {
	/// Client identifier.
	#[serde(default)]
	pub client_id: Option<String>,
}

/// Body of the multiplexed booking endpoint.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
	/// Operation wire name.
	pub operation: String,
	/// Scoped client token forwarded to the client API.
	#[serde(default)]
	pub token: Option<ClientToken>,
	/// Operation variables.
	#[serde(default)]
	pub variables: Option<BookingVariables>,
	/// Cart targeted by cart operations.
	#[serde(default)]
	pub cart_id: Option<String>,
}

/// Variables accepted by booking operations.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingVariables {
	/// Location for `createCart`.
	#[serde(default)]
	pub location_id: Option<String>,
	/// Date for `getAvailableTimes`.
	#[serde(default)]
	pub search_date: Option<String>,
	/// Time zone for `getAvailableTimes`.
	#[serde(default)]
	pub tz: Option<String>,
}

/// Body of the staff listing.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffBody {
	/// Location to list staff for.
	#[serde(default)]
	pub location_id: Option<String>,
}

/// Body of the availability search.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBody {
	/// Month number, 1-12.
	#[serde(default)]
	pub month: Option<u8>,
	/// Calendar year.
	#[serde(default)]
	pub year: Option<i32>,
	/// Location to search.
	#[serde(default)]
	pub location_id: Option<String>,
	/// Staff member to restrict the search to.
	#[serde(default)]
	pub staff_id: Option<String>,
}
impl AvailabilityBody {
	fn into_request(self) -> Result<AvailabilityRequest> {
		let (Some(month), Some(year)) = (self.month, self.year) else {
			return Err(Error::invalid_request("Month and year required"));
		};

		Ok(AvailabilityRequest {
			month,
			year,
			location_id: non_blank(self.location_id.as_deref()).map(LocationId::new).transpose()?,
			staff_id: non_blank(self.staff_id.as_deref()).map(StaffId::new).transpose()?,
		})
	}
}

async fn health(State(state): State<AppState>) -> ApiResult {
	let timestamp = OffsetDateTime::now_utc()
		.format(&Rfc3339)
		.map_err(|e| ApiError::internal("Health check failed", e.to_string()))?;

	Ok(Json(json!({
		"status": "healthy",
		"timestamp": timestamp,
		"business": state.gateway.config.business_id,
	})))
}

async fn lookup_client(State(state): State<AppState>, payload: Payload<ClientLookup>) -> ApiResult {
	const ROUTE: &str = "Client lookup failed";

	let Json(lookup) = payload?;
	let client = state.gateway.lookup_client(&lookup).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({ "client": client })))
}

async fn generate_token(State(state): State<AppState>, payload: Payload<ClientIdBody>) -> ApiResult {
	const ROUTE: &str = "Token generation failed";

	let Json(body) = payload?;
	let client_id = parse_client_id(body, ROUTE)?;
	let token = state.gateway.issue_client_token(&client_id).map_err(failed(ROUTE))?;

	Ok(Json(json!({ "token": token.expose() })))
}

async fn authenticate_client(
	State(state): State<AppState>,
	payload: Payload<ClientIdBody>,
) -> ApiResult {
	const ROUTE: &str = "Client authentication failed";

	let Json(body) = payload?;
	let client_id = parse_client_id(body, ROUTE)?;
	let issued = state.gateway.authenticate_client(&client_id).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({ "token": issued.token.expose(), "expiresAt": issued.expires_at })))
}

async fn booking(State(state): State<AppState>, payload: Payload<BookingBody>) -> ApiResult {
	const ROUTE: &str = "Booking operation failed";

	let Json(body) = payload?;
	let operation = body.operation.parse::<BookingOperation>().map_err(failed(ROUTE))?;

	tracing::info!(operation = operation.as_str(), "Booking operation requested.");

	dispatch_booking(&state, operation, body).await.map(Json).map_err(failed(ROUTE))
}

async fn dispatch_booking(
	state: &AppState,
	operation: BookingOperation,
	body: BookingBody,
) -> Result<Value> {
	let gateway = &state.gateway;
	let token = body.token.as_ref();
	let variables = body.variables.unwrap_or_default();
	let cart_id = || CartId::new(body.cart_id.as_deref().unwrap_or_default());

	let response = match operation {
		BookingOperation::GetAppointmentHistory => {
			let appointments = gateway.appointment_history(token).await?;

			json!({ "appointments": appointments })
		},
		BookingOperation::GetMembership => {
			let membership = gateway.active_membership(token).await?;

			json!({ "membership": membership })
		},
		BookingOperation::CreateCart => {
			let location_id = LocationId::new(variables.location_id.as_deref().unwrap_or_default())?;
			let created = gateway.create_cart(&location_id, token).await?;

			json!({ "cartId": created.cart_id, "cart": created.cart })
		},
		BookingOperation::GetAvailableTimes => {
			let times = gateway
				.available_times(
					&cart_id()?,
					variables.search_date.as_deref().unwrap_or_default(),
					variables.tz.as_deref(),
					token,
				)
				.await?;

			json!({ "times": times })
		},
		BookingOperation::CompleteBooking => {
			let booking = gateway.complete_booking(&cart_id()?, token).await?;

			json!({ "booking": booking })
		},
	};

	Ok(response)
}

async fn client_membership(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
	const ROUTE: &str = "Membership lookup failed";

	let token = bearer_token(&headers)?;
	let membership = state.gateway.active_membership(Some(&token)).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({ "membership": membership })))
}

async fn appointment_history(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
	const ROUTE: &str = "Appointment history lookup failed";

	let token = bearer_token(&headers)?;
	let appointments =
		state.gateway.appointment_history(Some(&token)).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({ "appointments": appointments })))
}

async fn staff(State(state): State<AppState>, payload: Payload<StaffBody>) -> ApiResult {
	const ROUTE: &str = "Staff lookup failed";

	let Json(body) = payload?;
	let location_id = non_blank(body.location_id.as_deref())
		.map(LocationId::new)
		.transpose()
		.map_err(|e| ApiError::from_error(ROUTE, e.into()))?;
	let staff = state.gateway.location_staff(location_id.as_ref()).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({ "staff": staff })))
}

async fn availability(State(state): State<AppState>, payload: Payload<AvailabilityBody>) -> ApiResult {
	const ROUTE: &str = "Availability lookup failed";

	let Json(body) = payload?;
	let request = body.into_request().map_err(failed(ROUTE))?;
	let availability = state.gateway.availability(&request).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({ "availability": availability })))
}

async fn create_booking(
	State(state): State<AppState>,
	payload: Payload<AppointmentRequest>,
) -> ApiResult {
	const ROUTE: &str = "Appointment request failed";

	let Json(request) = payload?;
	let appointment = state.gateway.create_appointment(&request).await.map_err(failed(ROUTE))?;

	Ok(Json(json!({
		"success": true,
		"appointment": appointment,
		"message": APPOINTMENT_SUBMITTED,
	})))
}

fn failed(route: &'static str) -> impl Fn(Error) -> ApiError {
	move |error| ApiError::from_error(route, error)
}

fn parse_client_id(body: ClientIdBody, route: &'static str) -> Result<ClientId, ApiError> {
	ClientId::new(body.client_id.unwrap_or_default()).map_err(|e| ApiError::from_error(route, e.into()))
}

fn bearer_token(headers: &HeaderMap) -> Result<ClientToken, ApiError> {
	headers
		.get(AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.strip_prefix(BEARER_PREFIX))
		.filter(|token| !token.is_empty())
		.map(ClientToken::new)
		.ok_or_else(ApiError::unauthorized)
}
