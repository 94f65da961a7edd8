use crate::stack_trace::{Frame, UNKNOWN_FUNCTION};

pub(crate) const CHROME: &str = "\
TypeError: Cannot read properties of undefined (reading 'layers')
    at initLayers (http://localhost:8888/static/bundle.js:412:23)
    at initMap (http://localhost:8888/static/bundle.js:389:18)
    at Array.forEach (native)
    at eval (eval at setup (http://localhost:8888/static/app.js:12:3), <anonymous>:1:1)
    at http://localhost:8888/static/bundle.js:530:5";

pub(crate) const FIREFOX: &str = "\
initLayers@http://localhost:8888/static/bundle.js:412:23
initMap/<@http://localhost:8888/static/bundle.js:389:18
setup@http://localhost:8888/static/app.js line 12 > eval:1:1
@http://localhost:8888/static/bundle.js:530:5
";

pub(crate) const SAFARI: &str = "\
initLayers@http://localhost:8888/static/bundle.js:412:23
forEach@[native code]
global code@http://localhost:8888/static/bundle.js:530:5";

pub(crate) const WINJS: &str = "\
Error: boom
   at initLayers (ms-appx://carto/js/bundle.js:412:23)
   at Anonymous function (ms-appx://carto/js/bundle.js:530)";

fn frame(name: &str, file: Option<&str>, args: &[&str], line: Option<u64>, column: Option<u64>) -> Frame {
    Frame {
        function_name: name.to_string(),
        file: file.map(String::from),
        arguments: args.iter().map(|s| s.to_string()).collect(),
        line_number: line,
        column,
    }
}

const BUNDLE: &str = "http://localhost:8888/static/bundle.js";
const APP: &str = "http://localhost:8888/static/app.js";

/// (name, raw trace, expected frames)
pub(crate) fn traces() -> Vec<(&'static str, &'static str, Vec<Frame>)> {
    vec![
        (
            "chrome",
            CHROME,
            vec![
                frame("initLayers", Some(BUNDLE), &[], Some(412), Some(23)),
                frame("initMap", Some(BUNDLE), &[], Some(389), Some(18)),
                frame("Array.forEach", None, &["native"], None, None),
                frame("eval", Some(APP), &[], Some(12), Some(3)),
                frame(UNKNOWN_FUNCTION, Some(BUNDLE), &[], Some(530), Some(5)),
            ],
        ),
        (
            "firefox",
            FIREFOX,
            vec![
                frame("initLayers", Some(BUNDLE), &[], Some(412), Some(23)),
                frame("initMap/<", Some(BUNDLE), &[], Some(389), Some(18)),
                frame("setup", Some(APP), &[], Some(12), None),
                frame(UNKNOWN_FUNCTION, Some(BUNDLE), &[], Some(530), Some(5)),
            ],
        ),
        (
            "safari",
            SAFARI,
            vec![
                frame("initLayers", Some(BUNDLE), &[], Some(412), Some(23)),
                frame("forEach", Some("[native code]"), &[], None, None),
                frame("global code", Some(BUNDLE), &[], Some(530), Some(5)),
            ],
        ),
        (
            "winjs",
            WINJS,
            vec![
                frame("initLayers", Some("ms-appx://carto/js/bundle.js"), &[], Some(412), Some(23)),
                frame("Anonymous function", Some("ms-appx://carto/js/bundle.js"), &[], Some(530), None),
            ],
        ),
    ]
}
