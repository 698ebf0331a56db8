//! Demo-grade checkout through the Razorpay widget. Payments are not verified.

use crate::error::PaymentError;
use crate::model::Plan;
use serde::Serialize;
use std::sync::mpsc::Receiver;

pub const MERCHANT_NAME: &str = "QuizGenius AI";
pub const THEME_COLOR: &str = "#2563EB";
const MERCHANT_IMAGE: &str = "https://picsum.photos/200/200";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub amount_minor_units: u64,
    pub currency: String,
    pub description: String,
}

impl CheckoutRequest {
    pub fn for_plan(plan: &Plan) -> Self {
        Self {
            amount_minor_units: plan.amount_minor_units(),
            currency: plan.currency.clone(),
            description: format!("Purchase {}", plan.checkout_label),
        }
    }
}

/// What the widget reports back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub description: String,
}

/// How an opened checkout ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    Paid(PaymentReceipt),
    /// The user closed the widget without paying.
    Dismissed,
}

#[derive(Debug, Serialize, PartialEq)]
struct Prefill {
    name: &'static str,
    email: &'static str,
    contact: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
struct Theme {
    color: &'static str,
}

/// Widget options minus the success handler, which is attached separately.
#[derive(Debug, Serialize, PartialEq)]
pub struct CheckoutOptions {
    key: String,
    amount: u64,
    currency: String,
    name: &'static str,
    description: String,
    image: &'static str,
    prefill: Prefill,
    theme: Theme,
}

pub fn checkout_options(
    key: &str,
    request: &CheckoutRequest,
) -> Result<CheckoutOptions, PaymentError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(PaymentError::MissingKey);
    }
    Ok(CheckoutOptions {
        key: key.to_string(),
        amount: request.amount_minor_units,
        currency: request.currency.clone(),
        name: MERCHANT_NAME,
        description: request.description.clone(),
        image: MERCHANT_IMAGE,
        prefill: Prefill {
            name: "Student Name",
            email: "student@example.com",
            contact: "9999999999",
        },
        theme: Theme { color: THEME_COLOR },
    })
}

/// Opens the widget. Exactly one [`CheckoutEvent`] arrives on the returned
/// channel: the receipt, or a dismissal.
#[cfg(not(target_arch = "wasm32"))]
pub fn open_checkout(
    key: &str,
    request: &CheckoutRequest,
) -> Result<Receiver<CheckoutEvent>, PaymentError> {
    checkout_options(key, request)?;
    log::warn!("checkout requested on a native build: {}", request.description);
    Err(PaymentError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
pub fn open_checkout(
    key: &str,
    request: &CheckoutRequest,
) -> Result<Receiver<CheckoutEvent>, PaymentError> {
    use js_sys::{Array, Function, JSON, Object, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    let options = checkout_options(key, request)?;
    let json = serde_json::to_string(&options).map_err(|e| PaymentError::Widget(e.to_string()))?;
    let js_options = JSON::parse(&json).map_err(|e| PaymentError::Widget(format!("{e:?}")))?;

    let (tx, rx) = std::sync::mpsc::channel();
    let dismiss_tx = tx.clone();
    let description = request.description.clone();
    let handler = Closure::once_into_js(move |response: JsValue| {
        let payment_id = Reflect::get(&response, &JsValue::from_str("razorpay_payment_id"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        log::info!("payment completed: {payment_id}");
        let _ = tx.send(CheckoutEvent::Paid(PaymentReceipt {
            payment_id,
            description,
        }));
    });
    Reflect::set(&js_options, &JsValue::from_str("handler"), &handler)
        .map_err(|e| PaymentError::Widget(format!("{e:?}")))?;

    // the success handler never runs when the modal is closed, so the
    // dismissal has to be reported on its own
    let on_dismiss = Closure::once_into_js(move || {
        log::info!("checkout dismissed");
        let _ = dismiss_tx.send(CheckoutEvent::Dismissed);
    });
    let modal = Object::new();
    Reflect::set(&modal, &JsValue::from_str("ondismiss"), &on_dismiss)
        .and_then(|_| Reflect::set(&js_options, &JsValue::from_str("modal"), &modal))
        .map_err(|e| PaymentError::Widget(format!("{e:?}")))?;

    let window = web_sys::window().ok_or_else(|| PaymentError::Widget("no window".into()))?;
    let constructor: Function = Reflect::get(&window, &JsValue::from_str("Razorpay"))
        .ok()
        .and_then(|v| v.dyn_into().ok())
        .ok_or_else(|| PaymentError::Widget("Razorpay script is not loaded".into()))?;

    let instance = Reflect::construct(&constructor, &Array::of1(&js_options))
        .map_err(|e| PaymentError::Widget(format!("{e:?}")))?;
    let open: Function = Reflect::get(&instance, &JsValue::from_str("open"))
        .ok()
        .and_then(|v| v.dyn_into().ok())
        .ok_or_else(|| PaymentError::Widget("widget has no open()".into()))?;
    open.call0(&instance)
        .map_err(|e| PaymentError::Widget(format!("{e:?}")))?;

    log::info!("checkout opened: {}", request.description);
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan {
            name: "Basic Plan".into(),
            checkout_label: "Basic Plan".into(),
            price: 49,
            currency: "INR".into(),
            tagline: "Perfect for quick revision.".into(),
            popular: false,
            features: vec![],
        }
    }

    #[test]
    fn request_uses_minor_units() {
        let request = CheckoutRequest::for_plan(&plan());
        assert_eq!(request.amount_minor_units, 4900);
        assert_eq!(request.currency, "INR");
        assert_eq!(request.description, "Purchase Basic Plan");
    }

    #[test]
    fn blank_key_is_a_config_error() {
        let request = CheckoutRequest::for_plan(&plan());
        assert_eq!(
            checkout_options("  ", &request),
            Err(PaymentError::MissingKey)
        );
        assert!(matches!(
            open_checkout("", &request),
            Err(PaymentError::MissingKey)
        ));
    }

    #[test]
    fn options_serialize_for_the_widget() {
        let request = CheckoutRequest::for_plan(&plan());
        let options = checkout_options(" rzp_test_123 ", &request).expect("options");
        let json = serde_json::to_value(&options).expect("json");
        assert_eq!(json["key"], "rzp_test_123");
        assert_eq!(json["amount"], 4900);
        assert_eq!(json["name"], MERCHANT_NAME);
        assert_eq!(json["theme"]["color"], THEME_COLOR);
        assert!(json.get("handler").is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_have_no_widget() {
        let request = CheckoutRequest::for_plan(&plan());
        assert!(matches!(
            open_checkout("rzp_test_123", &request),
            Err(PaymentError::Unavailable)
        ));
    }
}
