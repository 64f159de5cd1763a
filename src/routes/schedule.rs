//! Schedule routes: one GET per allow-listed table, plus appointment writes.

use crate::handlers::{appointments, read_table};
use crate::state::AppState;
use crate::table::Table;
use axum::{extract::State, routing::get, routing::MethodRouter, Router};

fn table_reader(table: Table) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>| read_table(state, table))
}

pub fn schedule_routes(state: AppState) -> Router {
    let mut router = Router::new();
    for table in Table::ALL {
        let path = format!("/{}", table.as_str());
        let method_router = match table {
            Table::Appointments => table_reader(table)
                .post(appointments::create)
                .put(appointments::update)
                .delete(appointments::delete),
            _ => table_reader(table),
        };
        router = router.route(&path, method_router);
    }
    router.with_state(state)
}
