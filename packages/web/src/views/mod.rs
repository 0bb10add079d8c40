mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::Dashboard;

mod pipeline;
pub use pipeline::Pipeline;

mod leads;
pub use leads::Leads;

mod agenda;
pub use agenda::Agenda;

mod conversations;
pub use conversations::Conversations;

mod admin;
pub use admin::Admin;

mod profile;
pub use profile::Profile;

mod not_found;
pub use not_found::NotFound;

use dioxus::prelude::*;

use crate::Route;

/// Map a sidebar path to its route. The shared layout only knows paths.
pub(crate) fn route_for(path: &str) -> Route {
    match path {
        "/pipeline" => Route::Pipeline {},
        "/leads" => Route::Leads {},
        "/agenda" => Route::Agenda {},
        "/conversas" => Route::Conversations {},
        "/admin" => Route::Admin {},
        "/perfil" => Route::Profile {},
        _ => Route::Dashboard {},
    }
}

/// Sidebar navigation handler shared by every page view.
pub(crate) fn navigate(nav: Navigator, path: String) {
    nav.push(route_for(&path));
}
