pub mod available;
pub mod changes;
pub mod json;

use crate::store::Store;

pub fn print_available(store: &Store, json_output: bool) {
    if json_output {
        println!("{}", json::render(&available::collect(store)));
    } else {
        print!("{}", available::render(store));
    }
}

/// Prints nothing on a first-ever run: with a single distinct timestamp in
/// the store there is no earlier run to report against.
pub fn print_changes(store: &Store, json_output: bool) {
    let Some(changes) = changes::collect(store) else {
        return;
    };

    if json_output {
        println!("{}", json::render(&changes));
    } else {
        print!("{}", changes::render(&changes));
    }
}
