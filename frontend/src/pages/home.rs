//! Search page: owns the dataset load and the currently selected product.

use std::rc::Rc;

use common::model::product::Product;
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::product_display::ProductDisplay;
use crate::components::search_bar::SearchBar;
use crate::services::load_gate::{self, LoadState, LOAD_TIMEOUT_MS};
use crate::services::product_cache;

pub enum Msg {
    Loaded(Rc<Vec<Product>>),
    LoadFailed(String),
    ProductSelected(Product),
}

pub struct HomePage {
    dataset: LoadState,
    selected: Option<Product>,
}

impl Component for HomePage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            match load_dataset().await {
                Ok(products) => link.send_message(Msg::Loaded(products)),
                Err(reason) => link.send_message(Msg::LoadFailed(reason)),
            }
        });

        Self {
            dataset: LoadState::Loading,
            selected: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(products) => {
                self.dataset = LoadState::Ready(products);
                true
            }
            Msg::LoadFailed(reason) => {
                gloo_console::error!("dataset load failed:", reason.clone());
                self.dataset = LoadState::Failed(reason);
                true
            }
            Msg::ProductSelected(product) => {
                self.selected = Some(product);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.dataset {
            LoadState::Loading => html! {
                <main><div class="loading">{"Loading products..."}</div></main>
            },
            LoadState::Failed(reason) => html! {
                <main>
                    <div class="load-error">
                        { format!("Could not load the product dataset: {}", reason) }
                    </div>
                </main>
            },
            LoadState::Ready(products) => html! {
                <main>
                    <div id="welcomeBar">
                        <SearchBar
                            products={products.clone()}
                            on_product_selected={ctx.link().callback(Msg::ProductSelected)}
                        />
                    </div>
                    <ProductDisplay product={self.selected.clone()} />
                </main>
            },
        }
    }
}

/// Loads the dataset through the freshness-gated cache, bounded by the load
/// deadline, and decodes it into product records. An empty dataset is not an
/// error; it decodes to an empty list and the search simply finds nothing.
async fn load_dataset() -> Result<Rc<Vec<Product>>, String> {
    let load = async {
        let mut cache = product_cache::browser_cache().map_err(|e| e.to_string())?;
        let entry = cache.ensure_fresh().await.map_err(|e| e.to_string())?;
        let products: Vec<Product> = serde_json::from_str(&entry.body)
            .map_err(|e| format!("malformed dataset: {}", e))?;
        Ok(Rc::new(products))
    };

    match load_gate::bounded(load, TimeoutFuture::new(LOAD_TIMEOUT_MS)).await {
        Ok(result) => result,
        Err(load_gate::DeadlineExpired) => Err("timed out waiting for the dataset".to_string()),
    }
}
