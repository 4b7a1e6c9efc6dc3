// crates.io
use httpmock::prelude::*;
// self
use blvd_bff::{
	_preludet::*,
	auth::{CartId, ClientId, ClientToken, LocationId},
	booking::{AppointmentRequest, AvailabilityRequest, ClientLookup},
};

const API_ROOT: &str = "/api/2020-01";

fn admin_path() -> String {
	format!("{API_ROOT}/admin")
}

fn client_path() -> String {
	format!("{API_ROOT}/{TEST_BUSINESS_ID}/client")
}

#[tokio::test]
async fn lookup_returns_the_first_matching_client() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));

	server
		.mock_async(|when, then| {
			when.method(POST).path(admin_path());
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"clients":{"edges":[
					{"node":{"id":"urn:blvd:Client:1","firstName":"Ada","lastName":"Lovelace",
					         "email":"ada@example.com","mobilePhone":"+15555550100",
					         "currentAccountBalance":0,"active":true}}
				]}}}"#,
			);
		})
		.await;

	let lookup = ClientLookup { email: None, phone: Some("+15555550100".into()) };
	let client = gateway
		.lookup_client(&lookup)
		.await
		.expect("Lookup should succeed.")
		.expect("The mock returns one client.");

	assert_eq!(client.id.as_ref(), "urn:blvd:Client:1");
	assert_eq!(client.first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn lookup_without_criteria_never_calls_upstream() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST);
			then.status(500);
		})
		.await;
	let err = gateway
		.lookup_client(&ClientLookup::default())
		.await
		.expect_err("Empty lookups must be rejected.");

	assert!(err.is_client_error());
	assert_eq!(err.to_string(), "Email or phone required");

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn cart_lifecycle_reshapes_client_api_payloads() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let token = ClientToken::new("scoped-token");
	let mut mock = server
		.mock_async(|when, then| {
			when.method(POST).path(client_path());
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"createCart":{"cart":{"id":"urn:blvd:Cart:9","expiresAt":null,
				   "availableCategories":[{"name":"Injectables","availableItems":[]}]}}}}"#,
			);
		})
		.await;
	let location = LocationId::new("8a1e5c1c").expect("Location fixture is valid.");
	let created =
		gateway.create_cart(&location, Some(&token)).await.expect("Cart creation should succeed.");

	assert_eq!(created.cart_id.as_ref(), "urn:blvd:Cart:9");
	assert_eq!(created.cart.available_categories[0].name.as_deref(), Some("Injectables"));

	mock.delete_async().await;
	mock = server
		.mock_async(|when, then| {
			when.method(POST).path(client_path());
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"cartBookableTimes":[
					{"id":"t1","startTime":"2025-03-10T14:00:00-04:00"},
					{"id":"t2","startTime":"2025-03-10T15:00:00-04:00"}
				]}}"#,
			);
		})
		.await;

	let times = gateway
		.available_times(&created.cart_id, "2025-03-10", None, Some(&token))
		.await
		.expect("Bookable times should load.");

	assert_eq!(times.iter().map(|time| time.id.as_str()).collect::<Vec<_>>(), ["t1", "t2"]);

	mock.assert_calls_async(1).await;
	mock.delete_async().await;
	server
		.mock_async(|when, then| {
			when.method(POST).path(client_path());
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"checkoutCart":{"cart":{"id":"urn:blvd:Cart:9","completedAt":"2025-03-01T12:00:00Z"}}}}"#,
			);
		})
		.await;

	let completed =
		gateway.complete_booking(&created.cart_id, Some(&token)).await.expect("Checkout should succeed.");

	assert_eq!(completed.completed_at.as_deref(), Some("2025-03-01T12:00:00Z"));
}

#[tokio::test]
async fn blank_search_date_is_rejected_locally() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let cart = CartId::new("urn:blvd:Cart:9").expect("Cart fixture is valid.");
	let err = gateway
		.available_times(&cart, "  ", Some("UTC"), None)
		.await
		.expect_err("Blank dates must be rejected.");

	assert_eq!(err.to_string(), "Search date required");
}

#[tokio::test]
async fn availability_groups_open_slots_by_day() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));

	server
		.mock_async(|when, then| {
			when.method(POST).path(admin_path());
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"location":{"appointmentSlots":[
					{"startTime":"2025-03-10T14:00:00Z","endTime":"2025-03-10T15:00:00Z","available":true},
					{"startTime":"2025-03-10T15:00:00Z","endTime":"2025-03-10T16:00:00Z","available":false},
					{"startTime":"2025-03-12T09:00:00Z","endTime":"2025-03-12T10:00:00Z","available":true}
				]}}}"#,
			);
		})
		.await;

	let request = AvailabilityRequest {
		month: 3,
		year: 2025,
		location_id: Some(LocationId::new("urn:blvd:Location:1").expect("Location fixture is valid.")),
		staff_id: None,
	};
	let availability = gateway.availability(&request).await.expect("Availability should load.");

	assert_eq!(availability.keys().map(String::as_str).collect::<Vec<_>>(), ["2025-03-10", "2025-03-12"]);
	assert_eq!(availability["2025-03-10"][0].id, "slot-2025-03-10-0");
	assert_eq!(availability["2025-03-12"][0].id, "slot-2025-03-12-2");
}

#[tokio::test]
async fn unknown_location_has_no_staff() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));

	server
		.mock_async(|when, then| {
			when.method(POST).path(admin_path());
			then.status(200).header("content-type", "application/json").body(r#"{"data":{"location":null}}"#);
		})
		.await;

	let staff = gateway.location_staff(None).await.expect("Staff lookup should succeed.");

	assert!(staff.is_empty());
}

#[tokio::test]
async fn appointment_for_known_client_is_created_in_one_call() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(admin_path());
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"createAppointment":{"appointment":{
					"id":"urn:blvd:Appointment:5","startAt":"2025-03-10T15:00:00Z","endAt":null,
					"state":"BOOKED","location":{"name":"SoHo"},
					"appointmentServices":[{"service":{"name":"Botox"},"staff":null}]
				}}}}"#,
			);
		})
		.await;
	let request = AppointmentRequest {
		client_id: Some("urn:blvd:Client:1".into()),
		location_id: Some("urn:blvd:Location:1".into()),
		start_time: Some("2025-03-10T15:00:00Z".into()),
		treatment_type: Some("Botox".into()),
		..Default::default()
	};
	let appointment =
		gateway.create_appointment(&request).await.expect("Appointment creation should succeed.");

	assert_eq!(appointment.state.as_deref(), Some("BOOKED"));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn appointment_without_client_details_is_rejected() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let request = AppointmentRequest {
		location_id: Some("urn:blvd:Location:1".into()),
		start_time: Some("2025-03-10T15:00:00Z".into()),
		first_name: Some("Ada".into()),
		..Default::default()
	};
	let err = gateway.create_appointment(&request).await.expect_err("Incomplete requests fail.");

	assert!(err.is_client_error());
	assert_eq!(err.to_string(), "Client ID or first name, last name, and email required");
}

#[tokio::test]
async fn appointment_for_new_client_creates_the_client_first() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let create_client = server
		.mock_async(|when, then| {
			when.method(POST).path(admin_path()).body_includes("mutation CreateClient(");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"createClient":{"client":{
					"id":"urn:blvd:Client:77","firstName":"Ada","lastName":"Lovelace",
					"email":"ada@example.com","mobilePhone":null
				}}}}"#,
			);
		})
		.await;
	let create_appointment = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(admin_path())
				.body_includes("mutation CreateAppointment(")
				.body_includes(r#""clientId":"urn:blvd:Client:77""#);
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"createAppointment":{"appointment":{
					"id":"urn:blvd:Appointment:6","startAt":"2025-03-10T15:00:00Z","state":"BOOKED"
				}}}}"#,
			);
		})
		.await;
	let request = AppointmentRequest {
		first_name: Some("Ada".into()),
		last_name: Some("Lovelace".into()),
		email: Some("ada@example.com".into()),
		location_id: Some("urn:blvd:Location:1".into()),
		start_time: Some("2025-03-10T15:00:00Z".into()),
		..Default::default()
	};
	let appointment =
		gateway.create_appointment(&request).await.expect("Appointment creation should succeed.");

	assert_eq!(appointment.id, "urn:blvd:Appointment:6");

	create_client.assert_calls_async(1).await;
	create_appointment.assert_calls_async(1).await;
}

#[tokio::test]
async fn authenticate_client_returns_the_platform_token() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&server.url(API_ROOT));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(admin_path())
				.body_includes("mutation CreateClientAuthToken(")
				.body_includes(r#""clientId":"urn:blvd:Client:1""#);
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"createClientAuthToken":{"token":"platform-token","expiresAt":"2025-03-10T16:00:00Z"}}}"#,
			);
		})
		.await;
	let client_id = ClientId::new("urn:blvd:Client:1").expect("Client fixture is valid.");
	let issued =
		gateway.authenticate_client(&client_id).await.expect("Platform token creation should succeed.");

	assert_eq!(issued.token.expose(), "platform-token");
	assert_eq!(issued.expires_at.as_deref(), Some("2025-03-10T16:00:00Z"));

	mock.assert_calls_async(1).await;
}
