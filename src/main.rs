use quiz_genius::QuizApp;
use quiz_genius::config::AppConfig;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    // a missing .env is fine, the process environment still applies
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let config = AppConfig::load();
    log::info!("using model {} at {}", config.model, config.endpoint);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "QuizGenius AI",
        options,
        Box::new(|_cc| Ok(Box::new(QuizApp::new(config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document to mount into");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("canvas #the_canvas_id not found");
            return;
        };

        let config = AppConfig::load();
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::new(QuizApp::new(config)))),
            )
            .await;
        if let Err(err) = started {
            log::error!("failed to start eframe: {err:?}");
        }
    });
}
