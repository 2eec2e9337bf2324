/// Catalog row; read-only from the engine's point of view.
#[derive(Queryable)]
pub struct ServiceData {
    pub id: u64,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub is_active: bool,
}
