
mod scenario_insert;
mod scenario_update;
