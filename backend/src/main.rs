#[macro_use]
extern crate rocket;

use toptracks_backend::{api, config};

#[get("/")]
fn index() -> &'static str {
    "toptracks backend - POST /search with a query and a reCAPTCHA token"
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state().expect("App state setup failed.");
    let cors = config::create_cors().expect("CORS setup failed.");

    rocket::build()
        .manage(state)
        .mount("/", routes![index, api::search_top_videos])
        .register("/", catchers![api::too_many_requests])
        .attach(cors)
}
