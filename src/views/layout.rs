use rust_decimal::Decimal;

/// Escape text for HTML element and attribute content
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

pub fn money(amount: Decimal) -> String {
    format!("{:.2} €", amount.round_dp(2))
}

/// Full document for a public page
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} · Atelier</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Full document with the back-office navigation
pub fn backoffice(title: &str, body: &str) -> String {
    let nav = concat!(
        "<nav>",
        "<a href=\"/bo\">Tableau de bord</a> ",
        "<a href=\"/bo/matieres\">Matières</a> ",
        "<a href=\"/bo/bougies\">Bougies</a> ",
        "<a href=\"/bo/projections\">Projections</a> ",
        "<form method=\"post\" action=\"/api/auth/signout\"><button type=\"submit\">Déconnexion</button></form>",
        "</nav>"
    );
    document(title, &format!("{}\n<main>\n<h1>{}</h1>\n{}\n</main>", nav, escape(title), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"Rose\" & 'Lys'</b>"), "&lt;b&gt;&quot;Rose&quot; &amp; &#39;Lys&#39;&lt;/b&gt;");
    }

    #[test]
    fn formats_money_with_two_decimals() {
        assert_eq!(money(Decimal::from_str("24").unwrap()), "24.00 €");
        assert_eq!(money(Decimal::from_str("3.14159").unwrap()), "3.14 €");
    }
}
