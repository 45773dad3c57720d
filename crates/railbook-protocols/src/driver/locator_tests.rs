use super::*;

#[test]
fn test_parse_prefixed_locators() {
    assert_eq!(
        "css=#origin input".parse::<Locator>().unwrap(),
        Locator::css("#origin input")
    );
    assert_eq!(
        "xpath=//button[text()='Search']".parse::<Locator>().unwrap(),
        Locator::xpath("//button[text()='Search']")
    );
}

#[test]
fn test_parse_bare_locators() {
    assert_eq!("button.search_btn".parse::<Locator>().unwrap(), Locator::css("button.search_btn"));
    assert_eq!("//div[@id='x']".parse::<Locator>().unwrap(), Locator::xpath("//div[@id='x']"));
    assert_eq!("(//a)[2]".parse::<Locator>().unwrap(), Locator::xpath("(//a)[2]"));
}

#[test]
fn test_parse_rejects_empty() {
    assert!("".parse::<Locator>().is_err());
    assert!("css=  ".parse::<Locator>().is_err());
}

#[test]
fn test_within_and_display() {
    let row = Locator::nth("app-passenger", 1);
    let name = row.within("input[placeholder='Name']");
    assert_eq!(
        name.to_string(),
        "css=app-passenger >> nth=1 >> css=input[placeholder='Name']"
    );
}

#[test]
fn test_xpath_literal_quoting() {
    assert_eq!(xpath_literal("Phoolan Devi"), "\"Phoolan Devi\"");
    assert_eq!(xpath_literal("say \"hi\""), "'say \"hi\"'");
    assert_eq!(xpath_literal("a\"b'c"), "concat(\"a\", '\"', \"b'c\")");
}

#[test]
fn test_exact_title() {
    assert_eq!(
        Locator::exact_title("Ghansidas Pandey"),
        Locator::xpath("//*[@title=\"Ghansidas Pandey\"]")
    );
}

#[test]
fn test_ready_state_round_trip_names() {
    assert_eq!("networkidle".parse::<ReadyState>().unwrap(), ReadyState::NetworkIdle);
    assert_eq!(ReadyState::DomContentLoaded.to_string(), "domcontentloaded");
    assert!("idle".parse::<ReadyState>().is_err());
}
