//! Per-resource list screens: columns, search fields and the lookups that
//! turn foreign ids into names.

use anyhow::Result;
use malha_client::ApiClient;
use malha_core::format::{format_brl, format_cpf, format_date, format_phone, short_id};
use malha_crud::{Column, Lookup, Table};
use malha_model::{
    Color, Customer, Material, MaterialInput, Mesh, Product, ProductVariation, Resource, Sale,
    Size, User,
};
use tracing::warn;

/// Shown for foreign ids that match nothing.
const MISSING: &str = "N/A";

/// Resource kinds the CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Customer,
    Color,
    Size,
    Mesh,
    Material,
    MaterialInput,
    Product,
    ProductVariation,
    Sale,
    User,
}

impl Kind {
    /// Map a singular/plural resource name to its kind.
    pub fn parse(resource: &str) -> Result<Self> {
        match resource.to_lowercase().as_str() {
            "customer" | "customers" => Ok(Kind::Customer),
            "color" | "colors" => Ok(Kind::Color),
            "size" | "sizes" => Ok(Kind::Size),
            "mesh" | "meshes" => Ok(Kind::Mesh),
            "material" | "materials" => Ok(Kind::Material),
            "material-input" | "material-inputs" | "materialinput" | "materialinputs" => {
                Ok(Kind::MaterialInput)
            }
            "product" | "products" => Ok(Kind::Product),
            "product-variation" | "product-variations" | "productvariation"
            | "productvariations" | "variation" | "variations" => Ok(Kind::ProductVariation),
            "sale" | "sales" => Ok(Kind::Sale),
            "user" | "users" => Ok(Kind::User),
            _ => Err(anyhow::anyhow!("Unknown resource type: {}", resource)),
        }
    }
}

/// Run `$body` with `$r` bound to the record type of `$kind`.
macro_rules! dispatch {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            $crate::views::Kind::Customer => { type $r = malha_model::Customer; $body }
            $crate::views::Kind::Color => { type $r = malha_model::Color; $body }
            $crate::views::Kind::Size => { type $r = malha_model::Size; $body }
            $crate::views::Kind::Mesh => { type $r = malha_model::Mesh; $body }
            $crate::views::Kind::Material => { type $r = malha_model::Material; $body }
            $crate::views::Kind::MaterialInput => { type $r = malha_model::MaterialInput; $body }
            $crate::views::Kind::Product => { type $r = malha_model::Product; $body }
            $crate::views::Kind::ProductVariation => {
                type $r = malha_model::ProductVariation;
                $body
            }
            $crate::views::Kind::Sale => { type $r = malha_model::Sale; $body }
            $crate::views::Kind::User => { type $r = malha_model::User; $body }
        }
    };
}
pub(crate) use dispatch;

/// How a resource is listed.
#[async_trait::async_trait]
pub trait View: Resource {
    const TITLE: &'static str;
    const SEARCH_FIELDS: &'static [&'static str];

    /// Build the table, fetching whatever related lists its columns need.
    async fn table(api: &ApiClient) -> Table<Self>;
}

/// Load a related collection for id resolution. Failures leave it empty.
async fn lookup<R: Resource>(api: &ApiClient) -> Lookup {
    let env = api.resource::<R>().list().await;
    if let Some(err) = &env.error {
        warn!(resource = R::PLURAL, error = %err, "lookup unavailable");
    }
    Lookup::from_items(env.data.as_deref().unwrap_or_default())
}

fn yes_no(v: bool) -> String {
    let s = if v { "yes" } else { "no" };
    s.to_string()
}

fn or_dash(v: &Option<String>) -> String {
    v.as_deref().filter(|s| !s.is_empty()).unwrap_or("-").to_string()
}

fn date_or_dash(v: &Option<String>) -> String {
    format_date(v.as_deref().unwrap_or_default())
}

#[async_trait::async_trait]
impl View for Customer {
    const TITLE: &'static str = "Customers";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "cpf", "phone"];

    async fn table(_api: &ApiClient) -> Table<Self> {
        Table::new(Self::TITLE)
            .column(Column::new("name", "Name"))
            .column(Column::with("email", "Email", |c: &Customer| or_dash(&c.email)))
            .column(Column::with("cpf", "CPF", |c: &Customer| {
                c.cpf.as_deref().map(format_cpf).unwrap_or_else(|| "-".into())
            }))
            .column(Column::with("phone", "Phone", |c: &Customer| {
                c.phone.as_deref().map(format_phone).unwrap_or_else(|| "-".into())
            }))
            .column(Column::with("address", "Address", |c: &Customer| {
                c.address.as_ref().map(|a| a.one_line()).unwrap_or_default()
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for Color {
    const TITLE: &'static str = "Colors";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];

    async fn table(_api: &ApiClient) -> Table<Self> {
        Table::new(Self::TITLE)
            .column(Column::new("name", "Name"))
            .column(Column::new("description", "Description"))
            .column(Column::with("createdAt", "Created", |c: &Color| {
                date_or_dash(&c.created_at)
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for Mesh {
    const TITLE: &'static str = "Meshes";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "composition"];

    async fn table(_api: &ApiClient) -> Table<Self> {
        Table::new(Self::TITLE)
            .column(Column::new("name", "Name"))
            .column(Column::new("composition", "Composition"))
            .column(Column::with("createdAt", "Created", |m: &Mesh| {
                date_or_dash(&m.created_at)
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for Size {
    const TITLE: &'static str = "Sizes";
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    async fn table(api: &ApiClient) -> Table<Self> {
        let meshes = lookup::<Mesh>(api).await;
        Table::new(Self::TITLE)
            .column(Column::new("name", "Name"))
            .column(Column::with("weight", "Weight (g)", |s: &Size| s.weight.to_string()))
            .column(Column::with("dimensions", "W x H x L (cm)", |s: &Size| s.dimensions()))
            .column(Column::with("meshTypeId", "Mesh", move |s: &Size| {
                meshes.resolve(&s.mesh_type_id, MISSING).to_string()
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for Material {
    const TITLE: &'static str = "Materials";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "supplie"];

    async fn table(api: &ApiClient) -> Table<Self> {
        let (meshes, colors) = tokio::join!(lookup::<Mesh>(api), lookup::<Color>(api));
        Table::new(Self::TITLE)
            .column(Column::with("name", "Name", |m: &Material| or_dash(&m.name)))
            .column(Column::with("supplie", "Supplier", |m: &Material| or_dash(&m.supplie)))
            .column(Column::with("inside", "Inside", |m: &Material| m.inside.to_string()))
            .column(Column::with("meshTypeId", "Mesh", move |m: &Material| {
                meshes.resolve(&m.mesh_type_id, MISSING).to_string()
            }))
            .column(Column::with("colorId", "Color", move |m: &Material| {
                colors.resolve(&m.color_id, MISSING).to_string()
            }))
            .column(Column::with("createdAt", "Created", |m: &Material| {
                date_or_dash(&m.created_at)
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for MaterialInput {
    const TITLE: &'static str = "Material inputs";
    const SEARCH_FIELDS: &'static [&'static str] = &["materialId"];

    async fn table(api: &ApiClient) -> Table<Self> {
        let materials = lookup::<Material>(api).await;
        Table::new(Self::TITLE)
            .column(Column::with("materialId", "Material", move |m: &MaterialInput| {
                materials.resolve(&m.material_id, MISSING).to_string()
            }))
            .column(Column::with("meters", "Meters", |m: &MaterialInput| m.meters.to_string()))
            .column(Column::with("weight", "Weight", |m: &MaterialInput| m.weight.to_string()))
            .column(Column::with("totalPrice", "Total", |m: &MaterialInput| {
                format_brl(m.total_price)
            }))
            .column(Column::with("createdAt", "Created", |m: &MaterialInput| {
                date_or_dash(&m.created_at)
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for Product {
    const TITLE: &'static str = "Products";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description", "cod"];

    async fn table(api: &ApiClient) -> Table<Self> {
        let materials = lookup::<Material>(api).await;
        Table::new(Self::TITLE)
            .column(Column::new("cod", "Code"))
            .column(Column::new("name", "Name"))
            .column(Column::new("description", "Description"))
            .column(Column::with("isSet", "Set", |p: &Product| yes_no(p.is_set)))
            .column(Column::with("materialId", "Material", move |p: &Product| {
                materials.resolve(&p.material_id, MISSING).to_string()
            }))
            .column(Column::with("createdAt", "Created", |p: &Product| {
                date_or_dash(&p.created_at)
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for ProductVariation {
    const TITLE: &'static str = "Product variations";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "gender"];

    async fn table(api: &ApiClient) -> Table<Self> {
        let (products, sizes) = tokio::join!(lookup::<Product>(api), lookup::<Size>(api));
        Table::new(Self::TITLE)
            .column(Column::new("name", "Name"))
            .column(Column::with("productId", "Product", move |v: &ProductVariation| {
                products.resolve(&v.product_id, MISSING).to_string()
            }))
            .column(Column::with("sizeId", "Size", move |v: &ProductVariation| {
                sizes.resolve(&v.size_id, MISSING).to_string()
            }))
            .column(Column::with("gender", "Gender", |v: &ProductVariation| v.gender.to_string()))
            .column(Column::with("features", "Features", |v: &ProductVariation| v.features()))
            .column(Column::with("enable", "Enabled", |v: &ProductVariation| yes_no(v.enable)))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[async_trait::async_trait]
impl View for Sale {
    const TITLE: &'static str = "Sales";
    const SEARCH_FIELDS: &'static [&'static str] = &["sku"];

    async fn table(api: &ApiClient) -> Table<Self> {
        let (customers, variations) = tokio::join!(
            lookup::<Customer>(api),
            lookup::<ProductVariation>(api)
        );
        sales_table(Self::TITLE, customers)
            .column(Column::with("productVariationId", "Variation", move |s: &Sale| {
                variations.resolve(&s.product_variation_id, MISSING).to_string()
            }))
            .column(Column::with("quantityItems", "Qty", |s: &Sale| {
                s.quantity_items.to_string()
            }))
            .column(Column::with("discount", "Discount", |s: &Sale| format_brl(s.discount)))
            .searchable(Self::SEARCH_FIELDS)
    }
}

/// Columns shared by the sales list and the dashboard's recent sales.
pub fn sales_table(title: &str, customers: Lookup) -> Table<Sale> {
    Table::new(title)
        .column(Column::with("sku", "SKU", |s: &Sale| match s.sku.as_deref() {
            Some(sku) if !sku.is_empty() => sku.to_string(),
            _ => short_id(&s.id).to_string(),
        }))
        .column(Column::with("customerId", "Customer", move |s: &Sale| {
            customers.resolve(&s.customer_id, MISSING).to_string()
        }))
        .column(Column::with("total", "Total", |s: &Sale| format_brl(s.net_value())))
        .column(Column::with("status", "Status", |s: &Sale| s.status.to_string()))
        .column(Column::with("saleDate", "Date", |s: &Sale| format_date(&s.sale_date)))
}

#[async_trait::async_trait]
impl View for User {
    const TITLE: &'static str = "Users";
    const SEARCH_FIELDS: &'static [&'static str] = &["userName", "role"];

    async fn table(_api: &ApiClient) -> Table<Self> {
        Table::new(Self::TITLE)
            .column(Column::with("role", "Role", |u: &User| {
                u.role.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
            }))
            .searchable(Self::SEARCH_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malha_model::SaleStatus;

    #[test]
    fn parse_kinds() {
        assert_eq!(Kind::parse("customers").unwrap(), Kind::Customer);
        assert_eq!(Kind::parse("Mesh").unwrap(), Kind::Mesh);
        assert_eq!(Kind::parse("meshes").unwrap(), Kind::Mesh);
        assert_eq!(Kind::parse("material-inputs").unwrap(), Kind::MaterialInput);
        assert_eq!(Kind::parse("variations").unwrap(), Kind::ProductVariation);
        assert!(Kind::parse("devices").is_err());
    }

    #[test]
    fn dispatch_binds_record_type() {
        let path = dispatch!(Kind::Sale, R => R::PATH);
        assert_eq!(path, "/sale");
        let name = dispatch!(Kind::MaterialInput, R => R::NAME);
        assert_eq!(name, MaterialInput::NAME);
    }

    #[test]
    fn sales_table_resolves_customers() {
        let customers: Vec<Customer> = serde_json::from_value(serde_json::json!([
            {"id": "c1", "name": "Maria"}
        ]))
        .unwrap();
        let sale: Sale = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "value": 100.0,
            "discount": 10.0,
            "status": 4,
            "saleDate": "2024-05-01",
            "customerId": "c1",
            "userId": "u1",
            "productVariationId": "pv1"
        }))
        .unwrap();
        assert_eq!(sale.status, SaleStatus::Delivered);

        let mut orphan = sale.clone();
        orphan.id = "s2".into();
        orphan.customer_id = "gone".into();

        let out = sales_table("Recent", Lookup::from_items(&customers)).render(&[sale, orphan], "");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("Maria"));
        assert!(lines[1].contains("R$ 90,00"));
        assert!(lines[1].contains("delivered"));
        assert!(lines[1].contains("01/05/2024"));
        assert!(lines[2].contains(MISSING));
    }
}
