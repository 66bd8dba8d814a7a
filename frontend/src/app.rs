use yew::prelude::*;

use crate::pages::home::HomePage;
use crate::pages::scan::ScanPage;
use crate::services::product_cache;

#[derive(Clone, Copy, PartialEq)]
pub enum Page {
    Home,
    Scan,
}

pub enum Msg {
    ShowPage(Page),
}

pub struct App {
    page: Page,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        // First-run analogue of the service-worker install step: warm the
        // cache once when the store is empty. May race the home page load;
        // the store is a plain overwrite, so the last writer wins.
        wasm_bindgen_futures::spawn_local(product_cache::prewarm_if_empty());

        Self { page: Page::Home }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ShowPage(page) => {
                let changed = self.page != page;
                self.page = page;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div>
                <nav>
                    <button onclick={link.callback(|_| Msg::ShowPage(Page::Home))}>{"Search"}</button>
                    <button onclick={link.callback(|_| Msg::ShowPage(Page::Scan))}>{"Scan"}</button>
                </nav>
                {
                    match self.page {
                        Page::Home => html! { <HomePage /> },
                        Page::Scan => html! { <ScanPage /> },
                    }
                }
            </div>
        }
    }
}
