mod figure;
mod page;

pub use figure::{growth_figure, DEFAULT_TITLE};
pub use page::{render_page, PageContent};
