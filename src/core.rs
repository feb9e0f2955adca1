//! Raw requests against the hero collection endpoint.
//!
//! Every function returns the failure as a [`HeroError`]; deciding what the
//! caller sees instead is left to [`crate::service::RemoteHeroService`].

use crate::api::api_hero;
use crate::error::{HeroError, Result};
use crate::types::{Hero, HeroId, NewHero};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

async fn send(request: RequestBuilder, method: &Method, url: &str) -> Result<Response> {
    tracing::debug!(%method, url, "sending request");

    let response = request
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|e| HeroError::new(method.clone(), url, e))?;

    tracing::debug!(%method, url, status = %response.status(), "response received");
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    method: Method,
    url: &str,
) -> Result<T> {
    send(request, &method, url)
        .await?
        .json::<T>()
        .await
        .map_err(|e| HeroError::new(method, url, e))
}

pub async fn get_heroes(client: &Client, base: &str) -> Result<Vec<Hero>> {
    send_json(client.get(base), Method::GET, base).await
}

pub async fn get_hero(client: &Client, base: &str, id: HeroId) -> Result<Hero> {
    let url = api_hero(base, id);
    send_json(client.get(&url), Method::GET, &url).await
}

/// `json` sets `Content-Type: application/json` on write requests.
pub async fn put_hero(client: &Client, base: &str, hero: &Hero) -> Result<Hero> {
    let url = api_hero(base, hero.id);
    send_json(client.put(&url).json(hero), Method::PUT, &url).await
}

pub async fn post_hero(client: &Client, base: &str, hero: &NewHero) -> Result<Hero> {
    send_json(client.post(base).json(hero), Method::POST, base).await
}

/// The response body, if any, is discarded.
pub async fn delete_hero(client: &Client, base: &str, id: HeroId) -> Result<()> {
    let url = api_hero(base, id);
    send(client.delete(&url), &Method::DELETE, &url).await?;
    Ok(())
}
