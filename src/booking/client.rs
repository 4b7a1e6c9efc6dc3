//! Client records: lookup, creation, and scoped credentials.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, ClientToken},
	booking::non_blank,
	gateway::{Gateway, GraphqlTransport},
	graphql::{self, Connection},
	obs::{self, OperationKind},
};

/// Client search input; at least one field must be present.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLookup {
	/// Email address to match exactly.
	#[serde(default)]
	pub email: Option<String>,
	/// Mobile phone number to match exactly.
	#[serde(default)]
	pub phone: Option<String>,
}
impl ClientLookup {
	/// Builds the Boulevard query expression, e.g. `email = "a@b.c" OR mobilePhone = "555"`.
	pub fn search_expression(&self) -> Result<String> {
		let clauses = [("email", self.email.as_deref()), ("mobilePhone", self.phone.as_deref())]
			.into_iter()
			.filter_map(|(field, value)| {
				non_blank(value).map(|value| format!("{field} = \"{}\"", escape_query_value(value)))
			})
			.collect::<Vec<_>>();

		if clauses.is_empty() {
			return Err(Error::invalid_request("Email or phone required"));
		}

		Ok(clauses.join(" OR "))
	}
}

/// Client record as exposed to the frontend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
	/// Client identifier.
	pub id: ClientId,
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Mobile phone number.
	#[serde(default)]
	pub mobile_phone: Option<String>,
	/// Account balance in minor currency units.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_account_balance: Option<i64>,
	/// Whether the client record is active.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
}

/// Input for creating a client record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Email address.
	pub email: String,
	/// Mobile phone number.
	#[serde(default)]
	pub phone: Option<String>,
}

/// Client token minted by Boulevard itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamClientToken {
	/// Token value.
	pub token: ClientToken,
	/// Expiry reported by the platform.
	#[serde(default)]
	pub expires_at: Option<String>,
}

#[derive(Deserialize)]
struct FindClientData {
	clients: Connection<ClientProfile>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClientData {
	create_client: CreateClientPayload,
}

#[derive(Deserialize)]
struct CreateClientPayload {
	client: ClientProfile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClientAuthTokenData {
	create_client_auth_token: UpstreamClientToken,
}

impl<T> Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Issues a scoped client token locally.
	pub fn issue_client_token(&self, client_id: &ClientId) -> Result<ClientToken> {
		obs::observe_local(OperationKind::IssueToken, || {
			self.token_issuer().issue(client_id).map_err(Error::from)
		})
	}

	/// Asks Boulevard to mint a client token through the admin API.
	pub async fn authenticate_client(&self, client_id: &ClientId) -> Result<UpstreamClientToken> {
		obs::observe(OperationKind::AuthenticateClient, &graphql::CREATE_CLIENT_AUTH_TOKEN, async {
			let data: CreateClientAuthTokenData = self
				.admin(
					&graphql::CREATE_CLIENT_AUTH_TOKEN,
					json!({ "input": { "clientId": client_id } }),
				)
				.await?;

			Ok(data.create_client_auth_token)
		})
		.await
	}

	/// Returns the first client matching the email or phone, if any.
	pub async fn lookup_client(&self, lookup: &ClientLookup) -> Result<Option<ClientProfile>> {
		obs::observe(OperationKind::LookupClient, &graphql::FIND_CLIENT, async {
			let query = lookup.search_expression()?;
			let data: FindClientData =
				self.admin(&graphql::FIND_CLIENT, json!({ "query": query })).await?;

			Ok(data.clients.first_node())
		})
		.await
	}

	/// Creates a client record.
	pub async fn create_client(&self, client: &NewClient) -> Result<ClientProfile> {
		obs::observe(OperationKind::CreateClient, &graphql::CREATE_CLIENT, async {
			let (Some(first_name), Some(last_name), Some(email)) = (
				non_blank(Some(client.first_name.as_str())),
				non_blank(Some(client.last_name.as_str())),
				non_blank(Some(client.email.as_str())),
			) else {
				return Err(Error::invalid_request("First name, last name, and email required"));
			};
			let data: CreateClientData = self
				.admin(
					&graphql::CREATE_CLIENT,
					json!({
						"input": {
							"firstName": first_name,
							"lastName": last_name,
							"email": email,
							"mobilePhone": non_blank(client.phone.as_deref()),
						}
					}),
				)
				.await?;

			Ok(data.create_client.client)
		})
		.await
	}
}

fn escape_query_value(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());

	for c in value.chars() {
		if matches!(c, '"' | '\\') {
			escaped.push('\\');
		}

		escaped.push(c);
	}

	escaped
}
