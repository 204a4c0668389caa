//! Screen implementations. Each screen is a top-level Component.

pub mod home;
pub mod leads;
pub mod products;
pub mod records;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create the screen components shown in the sidebar.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Home, Box::new(home::HomeScreen::new())),
        (ScreenId::Leads, Box::new(leads::LeadsScreen::new())),
        (ScreenId::Products, Box::new(products::ProductsScreen::new())),
    ]
}
