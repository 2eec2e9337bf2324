#[derive(Queryable)]
pub struct StaffData {
    pub id: u64,
    pub name: String,
    pub is_active: bool,
}
