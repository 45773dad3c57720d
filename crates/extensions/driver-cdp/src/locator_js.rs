//! In-page JavaScript built from [`Locator`]s.
//!
//! Every script is a self-contained expression for `Runtime.evaluate`.
//! Selector strings are embedded as JSON string literals so quotes and
//! backslashes in user-supplied selectors cannot break out of the script.

use railbook_protocols::Locator;

/// Outcome of [`choose_option_script`].
pub const OPTION_CHOSEN: &str = "ok";
pub const OPTION_NOT_SELECT: &str = "not-select";
pub const OPTION_MISSING: &str = "no-option";
pub const ELEMENT_MISSING: &str = "missing";

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Expression that evaluates to the element or `null`.
pub fn element_expr(locator: &Locator) -> String {
    match locator {
        Locator::Css(selector) => format!("document.querySelector({})", js_string(selector)),
        Locator::XPath(expr) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            js_string(expr)
        ),
        Locator::Nth { selector, index } => format!(
            "(document.querySelectorAll({})[{}] || null)",
            js_string(selector),
            index
        ),
        Locator::Within { parent, selector } => format!(
            "((p) => p ? p.querySelector({}) : null)({})",
            js_string(selector),
            element_expr(parent)
        ),
    }
}

/// Script returning an `ElementProbe` object.
///
/// Visible elements are scrolled into view first so the reported centre is
/// clickable.
pub fn probe_script(locator: &Locator) -> String {
    format!(
        r#"(() => {{
  const el = {expr};
  if (!el) return {{ found: false, visible: false }};
  const style = window.getComputedStyle(el);
  let rect = el.getBoundingClientRect();
  const visible = rect.width > 0 && rect.height > 0
    && style.visibility !== 'hidden' && style.display !== 'none';
  if (visible) {{
    el.scrollIntoView({{ block: 'center', inline: 'center' }});
    rect = el.getBoundingClientRect();
  }}
  const raw = el.innerText || (typeof el.value === 'string' ? el.value : '') || el.textContent || '';
  return {{
    found: true,
    visible,
    x: rect.left + rect.width / 2,
    y: rect.top + rect.height / 2,
    text: String(raw).trim(),
  }};
}})()"#,
        expr = element_expr(locator)
    )
}

/// Script that focuses the element and returns whether it took focus.
pub fn focus_script(locator: &Locator) -> String {
    format!(
        r#"(() => {{
  const el = {expr};
  if (!el) return false;
  el.focus();
  return document.activeElement === el || el.contains(document.activeElement);
}})()"#,
        expr = element_expr(locator)
    )
}

/// Script that selects an option by value, falling back to visible label.
///
/// Returns one of the `OPTION_*` / [`ELEMENT_MISSING`] markers.
pub fn choose_option_script(locator: &Locator, value: &str) -> String {
    format!(
        r#"(() => {{
  const el = {expr};
  if (!el) return '{missing}';
  if (el.tagName !== 'SELECT') return '{not_select}';
  const wanted = {value};
  const opts = Array.from(el.options);
  const opt = opts.find(o => o.value === wanted) || opts.find(o => o.label.trim() === wanted);
  if (!opt) return '{no_option}';
  el.value = opt.value;
  el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));
  return '{ok}';
}})()"#,
        expr = element_expr(locator),
        value = js_string(value),
        missing = ELEMENT_MISSING,
        not_select = OPTION_NOT_SELECT,
        no_option = OPTION_MISSING,
        ok = OPTION_CHOSEN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_expr_quotes_selector() {
        let expr = element_expr(&Locator::css("input[placeholder=\"From\"]"));
        assert_eq!(
            expr,
            r#"document.querySelector("input[placeholder=\"From\"]")"#
        );
    }

    #[test]
    fn test_xpath_expr() {
        let expr = element_expr(&Locator::exact_title("Ravi"));
        assert!(expr.starts_with("document.evaluate("));
        assert!(expr.contains(r#"//*[@title=\"Ravi\"]"#));
        assert!(expr.ends_with(".singleNodeValue"));
    }

    #[test]
    fn test_nth_expr() {
        let expr = element_expr(&Locator::nth("app-passenger", 2));
        assert_eq!(
            expr,
            r#"(document.querySelectorAll("app-passenger")[2] || null)"#
        );
    }

    #[test]
    fn test_within_expr_nests_parent() {
        let row = Locator::nth("app-passenger", 1);
        let expr = element_expr(&row.within("input[formcontrolname='passengerAge']"));
        assert!(expr.starts_with("((p) => p ? p.querySelector("));
        assert!(expr.contains(r#"querySelectorAll("app-passenger")[1]"#));
    }

    #[test]
    fn test_choose_option_embeds_value_as_literal() {
        let script = choose_option_script(&Locator::css("select"), "it's \"F\"");
        assert!(script.contains(r#"const wanted = "it's \"F\"";"#));
        assert!(script.contains("dispatchEvent(new Event('change'"));
    }

    #[test]
    fn test_probe_script_reports_missing() {
        let script = probe_script(&Locator::css("#pnr"));
        assert!(script.contains("found: false"));
        assert!(script.contains(r##"document.querySelector("#pnr")"##));
    }
}
