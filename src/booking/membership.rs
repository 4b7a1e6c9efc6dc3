//! Active membership lookup on the client API.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::ClientToken,
	gateway::{Gateway, GraphqlTransport},
	graphql::{self, Connection},
	obs::{self, OperationKind},
};

/// Membership held by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
	/// Membership identifier.
	pub id: String,
	/// Plan name.
	#[serde(default)]
	pub name: Option<String>,
	/// Lifecycle status (`ACTIVE`, ...).
	#[serde(default)]
	pub status: Option<String>,
	/// Remaining credit in minor currency units.
	#[serde(default)]
	pub account_credit: Option<i64>,
	/// First day of the membership.
	#[serde(default)]
	pub start_on: Option<String>,
	/// Last day of the membership.
	#[serde(default)]
	pub end_on: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipData {
	my_memberships: Connection<Membership>,
}

impl<T> Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Returns the active membership of the client behind `token`, if any.
	pub async fn active_membership(&self, token: Option<&ClientToken>) -> Result<Option<Membership>> {
		obs::observe(OperationKind::Membership, &graphql::ACTIVE_MEMBERSHIP, async {
			let data: MembershipData =
				self.client(&graphql::ACTIVE_MEMBERSHIP, Value::Null, token).await?;

			Ok(data.my_memberships.first_node())
		})
		.await
	}
}
