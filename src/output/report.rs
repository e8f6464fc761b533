use super::OutputRecord;

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

pub fn render_html(records: &[OutputRecord]) -> Vec<u8> {
    let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Userfetch Report</title>
  <style>
    body {{
      font-family: -apple-system, "Segoe UI", Roboto, sans-serif;
      background: #f8fafc;
      color: #0f172a;
      margin: 0;
    }}
    header {{
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 16px 32px;
      border-bottom: 1px solid #e2e8f0;
      background: #ffffff;
    }}
    h1 {{
      font-size: 18px;
      letter-spacing: -0.025em;
      margin: 0;
    }}
    main {{
      max-width: 1100px;
      margin: 0 auto;
      padding: 32px;
    }}
    #search {{
      width: 100%;
      box-sizing: border-box;
      padding: 10px 14px;
      margin-bottom: 20px;
      border: 1px solid #cbd5e1;
      border-radius: 8px;
      font-size: 14px;
    }}
    table {{
      width: 100%;
      border-collapse: collapse;
      background: #ffffff;
      border: 1px solid #e2e8f0;
      border-radius: 8px;
      overflow: hidden;
    }}
    th, td {{
      text-align: left;
      padding: 10px 14px;
      border-bottom: 1px solid #f1f5f9;
      font-size: 13px;
    }}
    th {{
      background: #f1f5f9;
      font-weight: 600;
      text-transform: uppercase;
      font-size: 11px;
      letter-spacing: 0.05em;
      color: #475569;
    }}
    td img {{
      width: 32px;
      height: 32px;
      border-radius: 9999px;
      vertical-align: middle;
    }}
    #count {{
      color: #64748b;
      font-size: 13px;
    }}
  </style>
</head>
<body>
  <script type="application/json" id="records-data">{json}</script>
  <header>
    <h1>Userfetch Report</h1>
    <span id="count"></span>
  </header>
  <main>
    <input id="search" placeholder="Search names, emails, countries..." type="text"/>
    <table>
      <thead>
        <tr><th></th><th>#</th><th>Name</th><th>Gender</th><th>Email</th><th>Phone</th><th>Country</th></tr>
      </thead>
      <tbody id="rows"></tbody>
    </table>
  </main>
  <script>
    const records = JSON.parse(document.getElementById("records-data").textContent);
    const rows = document.getElementById("rows");
    const count = document.getElementById("count");
    const search = document.getElementById("search");

    function esc(value) {{
      const div = document.createElement("div");
      div.textContent = value == null ? "" : String(value);
      return div.innerHTML;
    }}

    function render(filter) {{
      const needle = filter.trim().toLowerCase();
      const visible = records.filter(r => {{
        if (!needle) return true;
        return [r.name, r.email, r.country, r.city, r.phone, r.nationality]
          .some(v => (v || "").toLowerCase().includes(needle));
      }});
      rows.innerHTML = visible.map(r => `
        <tr>
          <td>${{r.picture ? `<img alt="" src="${{esc(r.picture)}}"/>` : ""}}</td>
          <td>${{r.index}}</td>
          <td>${{esc(r.name)}}</td>
          <td>${{esc(r.gender)}}</td>
          <td>${{esc(r.email)}}</td>
          <td>${{esc(r.phone)}}</td>
          <td>${{esc(r.country)}}</td>
        </tr>`).join("");
      count.textContent = `${{visible.length}} of ${{records.length}} records`;
    }}

    search.addEventListener("input", () => render(search.value));
    render("");
  </script>
</body>
</html>
"####
    );

    html.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tag_json_cannot_break_out() {
        assert_eq!(json_for_script_tag("</script>"), "<\\/script>");
    }

    #[test]
    fn report_embeds_records() {
        let records = vec![OutputRecord {
            index: 0,
            name: "Ms Ada Lovelace".to_string(),
            first: "Ada".to_string(),
            last: "Lovelace".to_string(),
            gender: "Female".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            cell: String::new(),
            country: "United Kingdom".to_string(),
            city: "London".to_string(),
            address: "12 Gower St".to_string(),
            nationality: "GB".to_string(),
            picture: String::new(),
        }];
        let html = String::from_utf8(render_html(&records)).unwrap();
        assert!(html.contains("Ms Ada Lovelace"));
        assert!(html.contains(r#"id="records-data""#));
    }
}
