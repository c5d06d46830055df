use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DebugLineProps {
    pub text: Option<String>,
}

#[function_component]
pub fn DebugLine(props: &DebugLineProps) -> Html {
    match &props.text {
        Some(text) => html! {
            <div style="position:absolute; bottom:40px; left:50%; transform:translateX(-50%); color:#0f0; font-size:14px; font-family:monospace; pointer-events:none; white-space:nowrap;">
                { text.clone() }
            </div>
        },
        None => html! {},
    }
}
