//! Debounced product search input with a ranked results dropdown.
//!
//! Keystrokes do not query the index directly: each input re-arms the
//! debounce, cancelling whatever query was scheduled before, so a burst of
//! typing collapses into a single query against the final text. Picking a
//! result emits `on_product_selected` to the page container.

use std::rc::Rc;

use common::model::product::Product;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::debounce::{Debounce, TimeoutScheduler};
use crate::services::search_index::SearchIndex;

/// Quiet period after the last keystroke before the query runs.
pub const DEBOUNCE_MS: u32 = 300;

/// Maximum number of dropdown entries.
const RESULT_LIMIT: usize = 10;

pub enum Msg {
    Input(String),
    RunSearch,
    Select(Product),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub products: Rc<Vec<Product>>,
    pub on_product_selected: Callback<Product>,
}

pub struct SearchBar {
    index: SearchIndex,
    term: String,
    results: Vec<Product>,
    debounce: Debounce<TimeoutScheduler>,
}

impl Component for SearchBar {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut index = SearchIndex::new();
        index.rebuild(ctx.props().products.clone());
        Self {
            index,
            term: String::new(),
            results: Vec::new(),
            debounce: Debounce::new(TimeoutScheduler, DEBOUNCE_MS),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if !Rc::ptr_eq(&ctx.props().products, &old_props.products) {
            self.index.rebuild(ctx.props().products.clone());
            self.results.clear();
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(term) => {
                self.term = term;
                let link = ctx.link().clone();
                self.debounce.schedule(move || link.send_message(Msg::RunSearch));
                true
            }
            Msg::RunSearch => {
                self.results = self.index.query(&self.term, RESULT_LIMIT);
                true
            }
            Msg::Select(product) => {
                self.term.clear();
                self.results.clear();
                self.debounce.clear();
                ctx.props().on_product_selected.emit(product);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="search-container">
                <input
                    type="text"
                    placeholder="Search for a product..."
                    value={self.term.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Input(input.value())
                    })}
                />
                {
                    if self.results.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <div class="dropdown">
                                {
                                    for self.results.iter().map(|product| {
                                        let selected = product.clone();
                                        html! {
                                            <div
                                                class="dropdown-item"
                                                onclick={link.callback(move |_| Msg::Select(selected.clone()))}
                                            >
                                                { format!("({}) {}", product.store, product.name) }
                                            </div>
                                        }
                                    })
                                }
                            </div>
                        }
                    }
                }
            </div>
        }
    }
}
