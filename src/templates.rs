use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, tmdb::SearchResult};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const THUMBNAIL_BASE: &str = "https://image.tmdb.org/t/p/w92";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

/// Values echoed back into a form plus the messages to show next to it.
#[derive(Debug, Default)]
pub struct FormState {
    pub title: String,
    pub rating: String,
    pub review: String,
    pub errors: Vec<String>,
}

pub fn list_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, form: &FormState, csrf_token: &str) -> String {
    let action = format!("/edit?id={}", movie.id);

    page(
        "Edit Movie",
        html! {
            (form_shell(html! {
                h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                p class="mt-2 text-gray-600" { "Edit Movie Rating" }
                (error_list(&form.errors))

                form class="mt-8 space-y-6" method="post" action=(action) {
                    input type="hidden" name="csrf_token" value=(csrf_token);
                    (text_field("rating", "Your rating out of 10 e.g. 7.5", &form.rating, true))
                    (text_field("review", "Your review", &form.review, true))
                    button class=(BUTTON_CLASS) type="submit" { "Done" }
                }
            }))
        },
    )
}

pub fn add_page(form: &FormState, csrf_token: &str) -> String {
    page(
        "Add Movie",
        html! {
            (form_shell(html! {
                h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
                (error_list(&form.errors))

                form class="mt-8 space-y-6" method="post" action="/add" {
                    input type="hidden" name="csrf_token" value=(csrf_token);
                    (text_field("title", "Movie title", &form.title, true))
                    (text_field("rating", "Rating out of 10", &form.rating, false))
                    (text_field("review", "Review", &form.review, false))
                    button class=(BUTTON_CLASS) type="submit" { "Add a movie" }
                }
            }))
        },
    )
}

pub fn select_page(query: &str, results: &[SearchResult], rating: &str, review: &str) -> String {
    page(
        "Select Movie",
        html! {
            (form_shell(html! {
                h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }

                @if results.is_empty() {
                    p class="mt-8 text-gray-600" { "No matches found." }
                } @else {
                    ul class="mt-8 divide-y divide-gray-200" {
                        @for result in results {
                            li class="py-3 flex gap-4" {
                                @if let Some(poster) = &result.poster_path {
                                    img class="w-12 rounded" src=(format!("{THUMBNAIL_BASE}{poster}")) alt="";
                                }
                                div {
                                    a class="text-blue-600 hover:text-blue-800" href=(select_href(result.id, rating, review)) {
                                        (result.title)
                                        @if let Some(date) = result.release_date.as_deref().filter(|d| !d.is_empty()) {
                                            span class="ml-2 text-gray-500" { "(" (date) ")" }
                                        }
                                    }
                                    @if let Some(overview) = &result.overview {
                                        p class="mt-1 text-sm text-gray-600 line-clamp-2" { (overview) }
                                    }
                                }
                            }
                        }
                    }
                }
                a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
            }))
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

/// Link to the confirm step. The pending rating and review ride along in
/// the query string.
pub fn select_href(tmdb_id: i64, rating: &str, review: &str) -> String {
    format!(
        "/select?id={}&rating={}&review={}",
        tmdb_id,
        urlencoding::encode(rating),
        urlencoding::encode(review)
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn form_shell(inner: Markup) -> Markup {
    html! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" { (inner) }
            }
        }
    }
}

fn text_field(name: &str, label: &str, value: &str, required: bool) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) name=(name) id=(name) value=(value) required[required];
        }
    }
}

fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="mt-6 rounded-md border border-red-200 bg-red-50 p-4 text-sm text-red-700" {
                @for error in errors {
                    li { (error) }
                }
            }
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            img class="w-24 rounded" src=(movie.img_url) alt=(movie.title);
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(rank) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (rank) }
                        }
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if let Some(rating) = movie.rating {
                        span class="text-lg font-semibold text-yellow-600" { (rating) }
                    }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/del?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}
