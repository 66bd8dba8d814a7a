//! Textual product card for the currently selected search result.

use common::model::product::Product;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub product: Option<Product>,
}

pub struct ProductDisplay;

impl Component for ProductDisplay {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(product) = &ctx.props().product else {
            return html! { <div>{"No product selected"}</div> };
        };

        let history = product.sorted_history();

        html! {
            <div class="product-card">
                <div class="product-header">{ &product.name }</div>
                <div class="price">{ format!("{:.2} € / {}", product.price, product.unit) }</div>
                {
                    if product.unavailable {
                        html! { <div class="unavailable">{"Unavailable"}</div> }
                    } else {
                        html! {}
                    }
                }
                <div class="store">{ format!("Store: {}", product.store) }</div>
                {
                    if product.bio {
                        html! { <div class="badge">{"Organic"}</div> }
                    } else {
                        html! {}
                    }
                }
                {
                    if product.is_weighted {
                        html! { <div class="badge">{"Priced by weight"}</div> }
                    } else {
                        html! {}
                    }
                }
                {
                    if product.url.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <a class="link" href={product.url.clone()} target="_blank">
                                {"Open at store"}
                            </a>
                        }
                    }
                }
                {
                    if history.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <div class="history">
                                <div class="history-title">{"Price history"}</div>
                                <ul>
                                    {
                                        for history.iter().map(|point| html! {
                                            <li>{ format!("{}: {:.2} €", point.date, point.price) }</li>
                                        })
                                    }
                                </ul>
                            </div>
                        }
                    }
                }
            </div>
        }
    }
}
