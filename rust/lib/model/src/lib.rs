//! Records of the malha ERP API.
//!
//! One module per REST collection. Records mirror the wire format
//! (camelCase JSON); cross-record fields such as `meshTypeId` are plain
//! foreign ids with no client-side integrity.

pub mod auth;
pub mod color;
pub mod customer;
pub mod material;
pub mod material_input;
pub mod mesh;
pub mod product;
pub mod product_variation;
pub mod resource;
pub mod sale;
pub mod size;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, ProblemDetails, SessionUser};
pub use color::{Color, NewColor};
pub use customer::{Address, Customer, NewCustomer};
pub use material::{Material, NewMaterial};
pub use material_input::{MaterialInput, NewMaterialInput};
pub use mesh::{Mesh, NewMesh};
pub use product::{NewProduct, Product};
pub use product_variation::{Gender, NewProductVariation, ProductVariation};
pub use resource::{Resource, WithId};
pub use sale::{NewSale, Sale, SaleStatus, SalesMetrics};
pub use size::{NewSize, Size};
pub use user::{CreateUserRequest, Role, UpdateUserRequest, User};
