//! Manual barcode entry.
//!
//! Stand-in for a camera scanner: a numeric input whose submitted value is
//! emitted through `on_barcode_detected`, the same signal a detector
//! component would raise.

use web_sys::HtmlInputElement;
use yew::prelude::*;

pub enum Msg {
    Input(String),
    Submit,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_barcode_detected: Callback<String>,
}

pub struct BarcodeEntry {
    code: String,
}

impl Component for BarcodeEntry {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { code: String::new() }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(code) => {
                self.code = code;
                false
            }
            Msg::Submit => {
                let code = self.code.trim().to_string();
                if !code.is_empty() {
                    ctx.props().on_barcode_detected.emit(code);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="barcode-entry">
                <input
                    type="text"
                    inputmode="numeric"
                    placeholder="Enter a barcode..."
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Input(input.value())
                    })}
                    onkeydown={link.batch_callback(|e: KeyboardEvent| {
                        (e.key() == "Enter").then_some(Msg::Submit)
                    })}
                />
                <button onclick={link.callback(|_| Msg::Submit)}>{"Look up"}</button>
            </div>
        }
    }
}
