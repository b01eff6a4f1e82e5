const COMMANDS: &[&str] = &[
    "load_store",
    "store_status",
    "get_product",
    "buy_product",
    "restore_purchases",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
