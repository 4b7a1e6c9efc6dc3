//! Fixed GraphQL documents. Caller input only ever travels through variables.

// self
use crate::_prelude::*;

/// Boulevard API surface a document targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
	/// Business-wide admin API, authenticated with the API key alone.
	Admin,
	/// Client-scoped API, authenticated with the API key plus a scoped client token.
	Client,
}
impl Surface {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Surface::Admin => "admin",
			Surface::Client => "client",
		}
	}
}
impl Display for Surface {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Named GraphQL document bound to the surface that serves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Document {
	/// Operation name declared inside `text`.
	pub name: &'static str,
	/// Surface the document must be sent to.
	pub surface: Surface,
	/// Document text.
	pub text: &'static str,
}

/// Searches clients by a Boulevard query expression; returns the first match.
pub const FIND_CLIENT: Document = Document {
	name: "FindClient",
	surface: Surface::Admin,
	text: r#"query FindClient($query: QueryString!) {
  clients(query: $query, first: 1) {
    edges {
      node {
        id
        firstName
        lastName
        email
        mobilePhone
        currentAccountBalance
        active
      }
    }
  }
}"#,
};

/// Creates a client record.
pub const CREATE_CLIENT: Document = Document {
	name: "CreateClient",
	surface: Surface::Admin,
	text: r#"mutation CreateClient($input: CreateClientInput!) {
  createClient(input: $input) {
    client {
      id
      firstName
      lastName
      email
      mobilePhone
    }
  }
}"#,
};

/// Asks Boulevard to mint a client token on the platform side.
pub const CREATE_CLIENT_AUTH_TOKEN: Document = Document {
	name: "CreateClientAuthToken",
	surface: Surface::Admin,
	text: r#"mutation CreateClientAuthToken($input: CreateClientAuthTokenInput!) {
  createClientAuthToken(input: $input) {
    token
    expiresAt
  }
}"#,
};

/// Five most recent appointments of the authenticated client.
pub const APPOINTMENT_HISTORY: Document = Document {
	name: "GetAppointmentHistory",
	surface: Surface::Client,
	text: r#"query GetAppointmentHistory {
  myAppointments(first: 5, sort: START_AT_DESC) {
    edges {
      node {
        id
        startAt
        endAt
        appointmentServices {
          staff {
            id
            firstName
            lastName
          }
          service {
            id
            name
          }
        }
        location {
          id
          name
        }
      }
    }
  }
}"#,
};

/// Active membership of the authenticated client.
pub const ACTIVE_MEMBERSHIP: Document = Document {
	name: "GetMembership",
	surface: Surface::Client,
	text: r#"query GetMembership {
  myMemberships(first: 1, query: "status = ACTIVE") {
    edges {
      node {
        id
        name
        status
        accountCredit
        startOn
        endOn
      }
    }
  }
}"#,
};

/// Opens a cart at a location and lists what can be booked there.
pub const CREATE_CART: Document = Document {
	name: "CreateCart",
	surface: Surface::Client,
	text: r#"mutation CreateCart($locationId: ID!) {
  createCart(input: { locationId: $locationId }) {
    cart {
      id
      expiresAt
      availableCategories {
        name
        availableItems {
          id
          name
          description
          ... on CartAvailableBookableItem {
            listPrice
            listDuration
            staffVariants {
              id
              price
              duration
              staff {
                id
                firstName
                lastName
              }
            }
          }
        }
      }
    }
  }
}"#,
};

/// Bookable start times for a cart on a given date.
pub const CART_BOOKABLE_TIMES: Document = Document {
	name: "GetCartBookableTimes",
	surface: Surface::Client,
	text: r#"query GetCartBookableTimes($cartId: ID!, $searchDate: Date!, $tz: String!) {
  cartBookableTimes(id: $cartId, searchDate: $searchDate, tz: $tz) {
    id
    startTime
  }
}"#,
};

/// Checks a cart out, turning it into a booking.
pub const CHECKOUT_CART: Document = Document {
	name: "CheckoutCart",
	surface: Surface::Client,
	text: r#"mutation CheckoutCart($cartId: ID!) {
  checkoutCart(input: { id: $cartId }) {
    cart {
      id
      completedAt
    }
  }
}"#,
};

/// Staff working at a location.
pub const LOCATION_STAFF: Document = Document {
	name: "GetStaff",
	surface: Surface::Admin,
	text: r#"query GetStaff($locationId: ID) {
  location(id: $locationId) {
    staff {
      id
      firstName
      lastName
      role {
        name
      }
      avatar {
        url
      }
    }
  }
}"#,
};

/// Appointment slots at a location over a date range.
pub const APPOINTMENT_SLOTS: Document = Document {
	name: "GetAvailability",
	surface: Surface::Admin,
	text: r#"query GetAvailability($locationId: ID, $staffId: ID, $startDate: Date!, $endDate: Date!) {
  location(id: $locationId) {
    appointmentSlots(staffId: $staffId, startDate: $startDate, endDate: $endDate) {
      startTime
      endTime
      available
    }
  }
}"#,
};

/// Books an appointment for a client.
pub const CREATE_APPOINTMENT: Document = Document {
	name: "CreateAppointment",
	surface: Surface::Admin,
	text: r#"mutation CreateAppointment($input: CreateAppointmentInput!) {
  createAppointment(input: $input) {
    appointment {
      id
      startAt
      endAt
      state
      location {
        name
      }
      appointmentServices {
        service {
          name
        }
        staff {
          firstName
          lastName
        }
      }
    }
  }
}"#,
};

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const ALL: [Document; 11] = [
		FIND_CLIENT,
		CREATE_CLIENT,
		CREATE_CLIENT_AUTH_TOKEN,
		APPOINTMENT_HISTORY,
		ACTIVE_MEMBERSHIP,
		CREATE_CART,
		CART_BOOKABLE_TIMES,
		CHECKOUT_CART,
		LOCATION_STAFF,
		APPOINTMENT_SLOTS,
		CREATE_APPOINTMENT,
	];

	#[test]
	fn operation_names_match_document_text() {
		for document in ALL {
			let header = document.text.lines().next().expect("Documents are never empty.");

			assert!(
				header.contains(&format!(" {}", document.name)),
				"Document `{}` declares a different operation: {header}",
				document.name
			);
		}
	}

	#[test]
	fn token_scoped_documents_target_the_client_surface() {
		for document in [APPOINTMENT_HISTORY, ACTIVE_MEMBERSHIP, CREATE_CART, CART_BOOKABLE_TIMES, CHECKOUT_CART] {
			assert_eq!(document.surface, Surface::Client, "{}", document.name);
		}
	}
}
