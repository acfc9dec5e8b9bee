//! Generic cloud API client.
//!
//! A call flows through: flatten params, pick the signing scheme from the
//! profile, sign against one captured instant, make one HTTP attempt, parse
//! the `Response` envelope.

pub mod client;
pub mod clock;
pub mod credential;
pub mod envelope;
pub mod params;
pub mod profile;
pub mod signer;
pub mod transport;

pub use client::{CloudClient, DEFAULT_REQUEST_CLIENT, PreparedRequest};
pub use clock::{Clock, FixedClock, FixedNonce, NonceSource, SigningInstant, SystemClock, SystemNonce};
pub use credential::Credential;
pub use envelope::parse_envelope;
pub use params::{FlatParams, flatten};
pub use profile::{ClientProfile, ClientProfileBuilder, HttpMethod, HttpProfile, SignatureMethod};
pub use signer::{LegacySigner, SignedHeaders, SignedQuery, SigningContext, Tc3Signer};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody, ReqwestTransport};
