//! Resource namespaces.
//!
//! Each namespace borrows the facade's transport and maps its operations to
//! a [`Request`](crate::Request). Request construction and input checks are
//! shared free functions; the namespace types then carry one `impl` block
//! per transport, async for [`HttpTransport`](crate::HttpTransport) and
//! blocking for [`BlockingTransport`](crate::BlockingTransport).

mod addresses;
mod backup;
mod events;
mod invoices;
mod keys;
mod l402;
mod payments;
mod restore;
mod transactions;
mod wallets;
mod webhooks;

pub use addresses::Addresses;
pub use backup::Backup;
pub use events::Events;
pub use invoices::Invoices;
pub use keys::Keys;
pub use l402::L402;
pub use payments::Payments;
pub use restore::Restore;
pub use transactions::Transactions;
pub use wallets::Wallets;
pub use webhooks::Webhooks;

use lnbot_proto::ListParams;

use crate::request::Request;

fn paginate(request: Request, params: ListParams) -> Request {
    request
        .query("limit", params.limit)
        .query("after", params.after)
}

macro_rules! namespace {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a, T> {
            transport: &'a T,
        }

        impl<'a, T> $name<'a, T> {
            pub(crate) const fn new(transport: &'a T) -> Self {
                Self { transport }
            }
        }
    };
}
use namespace;
