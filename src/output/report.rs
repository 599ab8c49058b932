use super::TableRecord;

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

pub fn render_html(records: &[TableRecord]) -> Vec<u8> {
    let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Multiplication Tables</title>
  <style>
    body {{
      font-family: 'Inter', system-ui, sans-serif;
      margin: 0;
      background: #f8fafc;
      color: #0f172a;
    }}
    header {{
      padding: 1.25rem 2rem;
      border-bottom: 1px solid #e2e8f0;
      background: #fff;
    }}
    h1 {{
      margin: 0;
      font-size: 1.25rem;
      letter-spacing: -0.025em;
    }}
    .tabs {{
      display: flex;
      flex-wrap: wrap;
      gap: 0.25rem;
      padding: 0.75rem 2rem 0;
      align-items: center;
    }}
    .tab {{
      display: inline-flex;
      align-items: center;
      gap: 0.5rem;
      padding: 0.4rem 0.75rem;
      border: 1px solid #cbd5e1;
      border-bottom: none;
      border-radius: 0.375rem 0.375rem 0 0;
      background: #e2e8f0;
      cursor: pointer;
      font-size: 0.875rem;
    }}
    .tab.active {{
      background: #fff;
      font-weight: 600;
    }}
    .tab .close {{
      border: none;
      background: none;
      cursor: pointer;
      font-size: 1rem;
      line-height: 1;
      color: #64748b;
    }}
    #closeAll {{
      margin-left: auto;
      padding: 0.35rem 0.75rem;
      border: 1px solid #cbd5e1;
      border-radius: 0.375rem;
      background: #fff;
      cursor: pointer;
    }}
    .panel {{
      display: none;
      margin: 0 2rem 2rem;
      padding: 1rem;
      background: #fff;
      border: 1px solid #cbd5e1;
      max-height: 75vh;
      overflow: auto;
    }}
    .panel.active {{
      display: block;
    }}
    .empty {{
      margin: 2rem;
      color: #64748b;
    }}
    table {{
      border-collapse: collapse;
      font-variant-numeric: tabular-nums;
    }}
    th, td {{
      border: 1px solid #e2e8f0;
      padding: 0.3rem 0.55rem;
      text-align: right;
    }}
    thead th {{
      position: sticky;
      top: 0;
      background: #f1f5f9;
      z-index: 1;
    }}
    tbody th {{
      position: sticky;
      left: 0;
      background: #f1f5f9;
    }}
    th.corner {{
      left: 0;
      z-index: 2;
    }}
    .row-hover td, td.col-hover {{
      background: #dbeafe;
    }}
    td.cell-hover {{
      background: #93c5fd;
      font-weight: 700;
    }}
  </style>
</head>
<body>
  <header>
    <h1>Multiplication Tables</h1>
  </header>
  <nav class="tabs" id="tabs"></nav>
  <main id="panels"></main>

  <script id="tables-data" type="application/json">{json}</script>
  <script>
    const tables = JSON.parse(document.getElementById('tables-data').textContent || '[]');
    const tabsEl = document.getElementById('tabs');
    const panelsEl = document.getElementById('panels');

    function buildTable(t) {{
      const table = document.createElement('table');
      const thead = document.createElement('thead');
      const headRow = document.createElement('tr');
      const corner = document.createElement('th');
      corner.className = 'corner';
      corner.textContent = 'x';
      headRow.appendChild(corner);
      for (const c of t.col_labels) {{
        const th = document.createElement('th');
        th.textContent = String(c);
        headRow.appendChild(th);
      }}
      thead.appendChild(headRow);
      table.appendChild(thead);

      const tbody = document.createElement('tbody');
      t.row_labels.forEach((label, r) => {{
        const tr = document.createElement('tr');
        const th = document.createElement('th');
        th.textContent = String(label);
        tr.appendChild(th);
        for (const v of t.cells[r]) {{
          const td = document.createElement('td');
          td.textContent = String(v);
          tr.appendChild(td);
        }}
        tbody.appendChild(tr);
      }});
      table.appendChild(tbody);

      table.addEventListener('mouseover', (e) => {{
        const td = e.target.closest('td');
        if (!td) return;
        const col = td.cellIndex + 1;
        table.querySelectorAll(`tbody td:nth-child(${{col}})`)
          .forEach(el => el.classList.add('col-hover'));
        td.closest('tr').classList.add('row-hover');
        td.classList.add('cell-hover');
      }});
      table.addEventListener('mouseout', () => {{
        table.querySelectorAll('.col-hover').forEach(el => el.classList.remove('col-hover'));
        table.querySelectorAll('.row-hover').forEach(el => el.classList.remove('row-hover'));
        table.querySelectorAll('.cell-hover').forEach(el => el.classList.remove('cell-hover'));
      }});
      return table;
    }}

    function activate(index) {{
      tabsEl.querySelectorAll('.tab').forEach((el, i) => el.classList.toggle('active', i === index));
      panelsEl.querySelectorAll('.panel').forEach((el, i) => el.classList.toggle('active', i === index));
    }}

    function render() {{
      tabsEl.innerHTML = '';
      panelsEl.innerHTML = '';
      if (tables.length === 0) {{
        const p = document.createElement('p');
        p.className = 'empty';
        p.textContent = 'No tables.';
        panelsEl.appendChild(p);
        return;
      }}
      let active = tables.findIndex(t => t.active);
      if (active < 0) active = 0;
      tables.forEach((t, i) => {{
        const tab = document.createElement('div');
        tab.className = 'tab';
        const label = document.createElement('span');
        label.textContent = t.title;
        tab.appendChild(label);
        const close = document.createElement('button');
        close.className = 'close';
        close.title = 'Close';
        close.textContent = '×';
        close.addEventListener('click', (e) => {{
          e.stopPropagation();
          const wasActive = i === active;
          tables.splice(i, 1);
          if (wasActive && tables.length > 0) {{
            tables.forEach(x => x.active = false);
            tables[Math.max(0, i - 1)].active = true;
          }}
          render();
        }});
        tab.appendChild(close);
        tab.addEventListener('click', () => {{
          tables.forEach((x, j) => x.active = j === i);
          active = i;
          activate(i);
        }});
        tabsEl.appendChild(tab);

        const panel = document.createElement('section');
        panel.className = 'panel';
        panel.appendChild(buildTable(t));
        panelsEl.appendChild(panel);
      }});
      const closeAll = document.createElement('button');
      closeAll.id = 'closeAll';
      closeAll.textContent = 'Close all';
      closeAll.addEventListener('click', () => {{
        tables.length = 0;
        render();
      }});
      tabsEl.appendChild(closeAll);
      activate(active);
    }}

    render();
  </script>
</body>
</html>
"####
    );

    html.into_bytes()
}
