//! HTML pages for the form interface

use axum::http::StatusCode;

use crate::config::{DEFAULT_N_RECS, DEFAULT_TOP_K};
use crate::core::Recommendation;

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem;color:#222}\
h1{color:#8a2be2}input,button{font-size:1rem;padding:.4rem;margin:.2rem 0}\
input[type=text]{width:100%}li{margin:.3rem 0}.muted{color:#777}.error{color:#b00020}";

fn layout(title: &str, body: &str) -> String {
	format!(
		"<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
		 <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
		escape(title),
		STYLE,
		body
	)
}

pub fn index_page() -> String {
	let body = format!(
		"<h1>Mood Recommender</h1>\n\
		 <form method=\"post\" action=\"/recommend\">\n\
		 <label for=\"prompt\">How are you feeling?</label>\n\
		 <input type=\"text\" id=\"prompt\" name=\"prompt\" placeholder=\"rainy evening, a bit nostalgic\" autofocus>\n\
		 <label for=\"n_recs\">Results</label>\n\
		 <input type=\"number\" id=\"n_recs\" name=\"n_recs\" min=\"1\" value=\"{}\">\n\
		 <label for=\"top_k\">Candidates</label>\n\
		 <input type=\"number\" id=\"top_k\" name=\"top_k\" min=\"1\" value=\"{}\">\n\
		 <button type=\"submit\">Recommend</button>\n\
		 </form>",
		DEFAULT_N_RECS, DEFAULT_TOP_K
	);
	layout("Mood Recommender", &body)
}

/// `None` means no prompt was given; `Some(&[])` means nothing matched.
pub fn results_page(prompt: &str, recommendations: Option<&[Recommendation]>) -> String {
	let list = match recommendations {
		None => "<p class=\"muted\">Enter a mood to get recommendations.</p>".to_string(),
		Some([]) => "<p class=\"muted\">No songs found.</p>".to_string(),
		Some(recs) => {
			let items: String = recs
				.iter()
				.map(|r| format!("<li>{}</li>\n", escape(&r.label)))
				.collect();
			format!("<ol>\n{}</ol>", items)
		}
	};

	let body = format!(
		"<h1>Recommendations</h1>\n<p>Mood: <strong>{}</strong></p>\n{}\n<p><a href=\"/\">Try another mood</a></p>",
		escape(prompt),
		list
	);
	layout("Recommendations", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
	let body = format!(
		"<h1>{}</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>",
		status.as_u16(),
		escape(message)
	);
	layout("Error", &body)
}

fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}
