//! Barcode lookup page.
//!
//! Consumes the barcode-detected signal from the entry component, skips
//! consecutive repeats of the same code, and shows what Open Food Facts
//! knows about the product.

use common::model::barcode::BarcodeProduct;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::barcode_entry::BarcodeEntry;
use crate::services::barcode_lookup;

pub enum Msg {
    BarcodeDetected(String),
    InfoLoaded(Option<BarcodeProduct>),
    LookupFailed(String),
}

pub struct ScanPage {
    last_barcode: Option<String>,
    product: Option<BarcodeProduct>,
    notice: Option<String>,
}

impl Component for ScanPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            last_barcode: None,
            product: None,
            notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::BarcodeDetected(code) => {
                if self.last_barcode.as_deref() == Some(code.as_str()) {
                    return false;
                }
                gloo_console::log!("scanned barcode:", code.clone());
                self.last_barcode = Some(code.clone());
                self.notice = None;

                let link = ctx.link().clone();
                spawn_local(async move {
                    match barcode_lookup::fetch_product_info(&code).await {
                        Ok(info) => link.send_message(Msg::InfoLoaded(info)),
                        Err(e) => link.send_message(Msg::LookupFailed(e.to_string())),
                    }
                });
                true
            }
            Msg::InfoLoaded(Some(product)) => {
                self.product = Some(product);
                self.notice = None;
                true
            }
            Msg::InfoLoaded(None) => {
                self.product = None;
                self.notice = Some("Product not found".to_string());
                true
            }
            Msg::LookupFailed(reason) => {
                gloo_console::error!("barcode lookup failed:", reason);
                self.product = None;
                self.notice = Some("Failed to fetch product information".to_string());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <main>
                <BarcodeEntry on_barcode_detected={ctx.link().callback(Msg::BarcodeDetected)} />
                { self.view_product_info() }
            </main>
        }
    }
}

impl ScanPage {
    fn view_product_info(&self) -> Html {
        if let Some(notice) = &self.notice {
            return html! { <p class="notice">{ notice }</p> };
        }

        let Some(product) = &self.product else {
            return html! { <p>{"No product scanned yet."}</p> };
        };

        html! {
            <div class="product-info">
                <h2>{ &product.product_name }</h2>
                <p>{ format!("Brand: {}", product.brands) }</p>
                <p>{ format!("Categories: {}", product.categories_tags.join(", ")) }</p>
                {
                    if product.image_url.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <img
                                src={product.image_url.clone()}
                                class="product-image"
                                alt={product.product_name.clone()}
                            />
                        }
                    }
                }
            </div>
        }
    }
}
