//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! On the server the public backend config arrives as Leptos context and is
//! written into the page head; after hydration `App` reads it back from that
//! meta tag. Both sides build one `FirebaseGateway` and provide it as context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::private_route::PrivateRoute;
use crate::net::firebase::FirebaseGateway;
use crate::net::types::FirebaseConfig;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::util::browser::{CONFIG_META_NAME, encode_config_meta, read_config_meta};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let config = use_context::<FirebaseConfig>().unwrap_or_default();
    let config_meta = encode_config_meta(&config);

    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name={CONFIG_META_NAME} content={config_meta}/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<FirebaseConfig>()
        .or_else(read_config_meta)
        .unwrap_or_default();
    if !config.is_configured() {
        log::warn!("backend config missing; auth requests will fail");
    }

    let gateway = FirebaseGateway::new(config);

    // Deferred so hydration sees the same unsettled state the server rendered.
    #[cfg(feature = "hydrate")]
    {
        let gateway = gateway.clone();
        leptos::task::spawn_local(async move { gateway.restore_session() });
    }

    provide_context(gateway);

    view! {
        <Stylesheet id="leptos" href="/pkg/flow360.css"/>
        <Title text="Flow 360"/>

        <Router>
            <Routes fallback=|| "Página não encontrada.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <PrivateRoute><DashboardPage/></PrivateRoute> }
                />
            </Routes>
        </Router>
    }
}
