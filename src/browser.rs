use anyhow::{anyhow, Result};
use futures::channel::oneshot::{channel, Receiver};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Fetch `url` and parse its body as JSON, leaving decoding to the caller
/// so it can tell a missing file apart from a malformed one.
pub async fn fetch_json(url: &str) -> Result<JsValue> {
    let window = web_sys::window().ok_or_else(|| anyhow!("Window not found"))?;
    let resp: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| anyhow!("error fetching {} : {:#?}", url, err))?
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    if !resp.ok() {
        return Err(anyhow!("fetching {} returned status {}", url, resp.status()));
    }

    let json = resp
        .json()
        .map_err(|err| anyhow!("Could not get JSON from response [{:#?}]", err))?;
    JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error reading JSON body of {} : {:#?}", url, err))
}

/// Hand JS a callback and get a future for its boolean argument.
/// - the callback must be leaked (`forget`) by the caller so JS owns it
/// - only the first call counts, later ones find the receiver gone
/// - a callback that is never invoked leaves the receiver pending forever
pub fn completion() -> (Closure<dyn FnMut(bool)>, Receiver<bool>) {
    let (tx, rx) = channel::<bool>();
    let mut tx = Some(tx);
    let done = Closure::wrap(Box::new(move |ok: bool| {
        if let Some(tx) = tx.take() {
            let _ = tx.send(ok);
        }
    }) as Box<dyn FnMut(bool)>);
    (done, rx)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn call(done: &Closure<dyn FnMut(bool)>, ok: bool) {
        let callback: &js_sys::Function = done.as_ref().unchecked_ref();
        callback
            .call1(&JsValue::NULL, &JsValue::from_bool(ok))
            .unwrap();
    }

    #[wasm_bindgen_test]
    async fn completion_resolves_with_the_first_result() {
        let (done, finished) = completion();
        call(&done, false);
        call(&done, true);
        assert_eq!(finished.await, Ok(false));
    }
}
