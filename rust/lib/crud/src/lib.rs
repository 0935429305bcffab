//! List screens for malha resources, independent of any UI.
//!
//! A [`CrudStore`] owns the loaded list of one collection and re-fetches
//! it after each successful mutation; [`Table`] renders a filtered view of
//! that list; [`Lookup`] turns foreign ids into labels.
//!
//! ```ignore
//! let store = CrudStore::new(session.client().resource::<Color>());
//! store.fetch().await;
//! let table = Table::new("Colors")
//!     .column(Column::new("name", "Name"))
//!     .searchable(&["name"]);
//! println!("{}", table.render_state(&store.state(), "azul"));
//! ```

pub mod lookup;
pub mod search;
pub mod store;
pub mod table;

pub use lookup::Lookup;
pub use search::{field_text, filter};
pub use store::{CrudApi, CrudState, CrudStore, StateHandler, SubscriptionId, FETCH_FAILED};
pub use table::{Column, Render, Table, NO_ITEMS, NO_RESULTS};
