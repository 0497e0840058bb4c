use layer_autodeploy_core::FunctionDescriptor;
use rand::seq::SliceRandom;
use rand::Rng;

pub const LIST_FUNCTIONS_PAGE_SIZE: i32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionPage {
    pub functions: Vec<FunctionDescriptor>,
    pub next_marker: Option<String>,
}

pub trait FunctionPager {
    fn fetch_page(&self, marker: Option<&str>, max_items: i32) -> Result<FunctionPage, String>;
}

/// Walks every page and returns the fleet in random order.
///
/// Any page failure fails the whole listing; a partial fleet is never returned.
pub fn collect_all_functions(
    pager: &impl FunctionPager,
    rng: &mut impl Rng,
) -> Result<Vec<FunctionDescriptor>, String> {
    tracing::info!(component = "discovery", "listing all available functions");

    let mut functions = Vec::new();
    let mut marker: Option<String> = None;
    loop {
        let page = pager.fetch_page(marker.as_deref(), LIST_FUNCTIONS_PAGE_SIZE)?;
        functions.extend(page.functions);

        match page.next_marker {
            Some(next) if !next.is_empty() => marker = Some(next),
            _ => break,
        }
    }

    functions.shuffle(rng);
    Ok(functions)
}
