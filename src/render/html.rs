use crate::model::ReportData;

/// Render a self-contained HTML report (data embedded as JSON).
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(data: &ReportData) -> anyhow::Result<String> {
    // Embedded inside <script>; a literal "</" would end the element early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Life-cycle graphs</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; color: #222; }
  header { display: flex; gap: 8px; align-items: center; padding: 10px 16px; border-bottom: 1px solid #ddd; height: 32px; }
  header button[role=tab] { padding: 6px 12px; border: 1px solid #ddd; border-radius: 6px; background: #fafafa; cursor: pointer; }
  header button[aria-selected=true] { background: #e9f2ff; border-color: #cfe3ff; }
  .panel { display: none; }
  .panel.active { display: flex; height: calc(100vh - 53px); }
  .sidebar { width: 260px; border-right: 1px solid #ddd; padding: 12px; overflow: auto; }
  .stage { flex: 1; overflow: hidden; position: relative; }
  .stage svg { width: 100%; height: 100%; cursor: grab; }
  .controls { display: flex; flex-direction: column; gap: 8px; margin-bottom: 12px; }
  .controls input, .controls select { padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px; }
  .muted { color: #777; font-size: 12px; }
  .notice { padding: 12px; color: #a33; }
  .legend { display: grid; grid-template-columns: 1fr 1fr; gap: 8px 16px; }
  .legend .row { display: flex; align-items: center; gap: 10px; font-size: 14px; }
  .legend .icon { display: inline-block; width: 18px; height: 18px; border: 1.5px solid #222; border-radius: 9999px; }
  .legend .icon.diamond { border-radius: 2px; transform: rotate(45deg); }
  .legend .icon.rounded { border-radius: 4px; }
  .legend .icon.hexagon { border: none; clip-path: polygon(50% 0%, 93% 25%, 93% 75%, 50% 100%, 7% 75%, 7% 25%); }

  svg .link { fill: none; stroke: #888; stroke-width: 1.4; }
  svg .link.back { stroke-dasharray: 4 3; stroke: #c77; }
  svg .link.edge-highlight { stroke: #d33; stroke-width: 2.4; }
  svg .edge-label { font-size: 10px; fill: #666; text-anchor: middle; }
  svg .node circle, svg .node rect, svg .node polygon { stroke: #222; stroke-width: 1.5; }
  svg .node.highlight circle, svg .node.highlight rect, svg .node.highlight polygon { stroke: #d33; stroke-width: 3; }
  svg .node .label { font-size: 11px; text-anchor: middle; dominant-baseline: middle; pointer-events: none; }
  svg .node { cursor: pointer; }
  svg text.notice { font-size: 16px; fill: #a33; text-anchor: middle; }

  .tip { position: fixed; pointer-events: none; opacity: 0; background: #222; color: #fff; padding: 8px 10px; border-radius: 8px; font-size: 13px; max-width: 320px; z-index: 10; }
  .tip a { color: #9cf; }
  .pill { padding: 1px 6px; border-radius: 999px; background: #444; font-size: 11px; }
</style>
</head>
<body>
<header>
  <button role="tab" id="tab-reaction" data-hash="#reaction">Reaction graph</button>
  <button role="tab" id="tab-dag" data-hash="#dag">Lineage</button>
</header>

<section class="panel" id="panel-reaction">
  <div class="sidebar">
    <div class="controls">
      <input id="reactionSearch" placeholder="Search (press /) ...">
    </div>
    <div id="reactionStatus" class="muted"></div>
    <div id="reactionLegend" class="legend"></div>
  </div>
  <div class="stage" id="reactionRoot"></div>
</section>

<section class="panel" id="panel-dag">
  <div class="sidebar">
    <div class="controls">
      <select id="dagRootSel"></select>
    </div>
    <div id="dagStatus" class="muted"></div>
    <div id="dagLegend" class="legend"></div>
  </div>
  <div class="stage" id="dagRoot"></div>
</section>

<div class="tip" id="tip"></div>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const tip = document.getElementById("tip");

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function drawLegend(el, entries) {
  el.innerHTML = "";
  for (const e of entries) {
    const row = document.createElement("div");
    row.className = "row";
    row.innerHTML = `<span class="icon ${e.icon}" style="background:${e.fill}"></span><span>${escapeHtml(e.kind)}</span>`;
    el.appendChild(row);
  }
}

// One state object per view; nothing is shared between the two.
function makeView(name, root, nodes, scaleExtent) {
  const view = { name, root, nodes, scaleExtent, pinned: null, zoom: { x: 0, y: 0, k: 1 }, pan: null };
  window.addEventListener("mousemove", (ev) => {
    if (!view.pan) return;
    view.zoom.x = view.pan.ox + (ev.clientX - view.pan.x);
    view.zoom.y = view.pan.oy + (ev.clientY - view.pan.y);
    applyZoom(view);
  });
  window.addEventListener("mouseup", () => { view.pan = null; });
  return view;
}

function applyZoom(view) {
  const g = view.root.querySelector("g.zoom");
  if (g) g.setAttribute("transform", `translate(${view.zoom.x},${view.zoom.y}) scale(${view.zoom.k})`);
}

function bindZoom(view) {
  const svg = view.root.querySelector("svg");
  if (!svg) return;
  svg.addEventListener("wheel", (ev) => {
    ev.preventDefault();
    const [lo, hi] = view.scaleExtent;
    const k = Math.min(hi, Math.max(lo, view.zoom.k * (ev.deltaY < 0 ? 1.1 : 1 / 1.1)));
    view.zoom.k = k;
    applyZoom(view);
  }, { passive: false });
  svg.addEventListener("mousedown", (ev) => {
    if (ev.target.closest("g.node")) return;
    view.pan = { x: ev.clientX, y: ev.clientY, ox: view.zoom.x, oy: view.zoom.y };
  });
}

function placeTip(ev) {
  tip.style.left = `${Math.min(window.innerWidth - 328, ev.clientX + 12)}px`;
  tip.style.top = `${Math.min(window.innerHeight - 428, ev.clientY + 12)}px`;
}

function hoverHtml(view, id) {
  const n = view.nodes[id] || {};
  return `<b>${escapeHtml(id)}</b> <span class="pill">${escapeHtml(n.type || "")}</span>` +
    '<div style="margin-top:4px;color:#ddd">Click for details</div>';
}

function pinnedHtml(view, id) {
  const n = view.nodes[id] || {};
  const src = n.source
    ? `<div style="margin:6px 0 8px"><a href="${escapeHtml(n.source)}" target="_blank" rel="noopener">Open SOURCE →</a></div>`
    : '<div style="margin:6px 0 8px"><span>No source link</span></div>';
  const img = n.image
    ? `<div style="margin:6px 0 8px"><img alt="thumbnail" src="${escapeHtml(n.image)}" style="max-width:260px;border-radius:6px;border:1px solid #333"></div>`
    : "";
  const body = `<div style="max-width:300px;line-height:1.35">${escapeHtml(n.description || "No description.")}</div>`;
  return `<div style="display:flex;justify-content:space-between;gap:8px"><div><b>${escapeHtml(id)}</b> <span class="pill">${escapeHtml(n.type || "")}</span></div>` +
    '<button id="tipClose" style="border:none;background:#333;color:#fff;border-radius:12px;cursor:pointer">×</button></div>' +
    src + img + body;
}

function unpin(view) {
  view.pinned = null;
  tip.style.opacity = 0;
  tip.style.pointerEvents = "none";
}

function bindTooltips(view) {
  for (const g of view.root.querySelectorAll("g.node")) {
    const id = g.getAttribute("data-id");
    g.addEventListener("mousemove", (ev) => {
      if (view.pinned) return;
      tip.innerHTML = hoverHtml(view, id);
      placeTip(ev);
      tip.style.opacity = 1;
    });
    g.addEventListener("mouseleave", () => {
      if (!view.pinned) tip.style.opacity = 0;
    });
    g.addEventListener("click", (ev) => {
      ev.stopPropagation();
      if (view.pinned === id) { unpin(view); return; }
      view.pinned = id;
      tip.innerHTML = pinnedHtml(view, id);
      placeTip(ev);
      tip.style.opacity = 1;
      tip.style.pointerEvents = "auto";
      const btn = document.getElementById("tipClose");
      if (btn) btn.onclick = (e) => { e.stopPropagation(); unpin(view); };
    });
  }
  const svg = view.root.querySelector("svg");
  if (svg) svg.addEventListener("click", (ev) => {
    if (ev.target === svg && view.pinned) unpin(view);
  });
}

// Replace the drawing wholesale; per-render state starts over.
function mount(view, svgText) {
  unpin(view);
  view.zoom = { x: 0, y: 0, k: 1 };
  view.root.innerHTML = svgText;
  bindZoom(view);
  bindTooltips(view);
}

function statusText(status) {
  return status.state === "idle" ? status.notice : "";
}

// Reaction view
const reaction = makeView("reaction", document.getElementById("reactionRoot"), DATA.reaction.nodes, [0.4, 2.5]);
function initReaction() {
  drawLegend(document.getElementById("reactionLegend"), DATA.reaction.legend);
  document.getElementById("reactionStatus").textContent = statusText(DATA.reaction.status);
  mount(reaction, DATA.reaction.drawing);
  const input = document.getElementById("reactionSearch");
  input.disabled = DATA.reaction.status.state !== "ready";
  input.addEventListener("input", (e) => runSearch(e.target.value));
}

function runSearch(q) {
  const query = (q || "").trim().toLowerCase();
  const ids = new Set();
  if (query) {
    for (const id of Object.keys(DATA.reaction.nodes)) {
      if (id.toLowerCase().includes(query)) ids.add(id);
    }
  }
  for (const g of reaction.root.querySelectorAll("g.node")) {
    g.classList.toggle("highlight", ids.has(g.getAttribute("data-id")));
  }
  for (const p of reaction.root.querySelectorAll("path.link")) {
    p.classList.toggle("edge-highlight",
      ids.has(p.getAttribute("data-source")) || ids.has(p.getAttribute("data-target")));
  }
}

// Lineage view
const dag = makeView("dag", document.getElementById("dagRoot"), DATA.lineage.nodes, [0.5, 2.5]);
function initDag() {
  drawLegend(document.getElementById("dagLegend"), DATA.lineage.legend);
  const status = document.getElementById("dagStatus");
  status.textContent = statusText(DATA.lineage.status);
  if (DATA.lineage.status.state !== "ready") return;

  const sel = document.getElementById("dagRootSel");
  sel.innerHTML = "";
  DATA.lineage.targets.forEach((id, i) => {
    const opt = document.createElement("option");
    opt.value = id;
    opt.textContent = id;
    if (i === 0) opt.selected = true;
    sel.appendChild(opt);
  });
  sel.addEventListener("change", () => renderDag(sel.value));
  if (DATA.lineage.targets.length) renderDag(DATA.lineage.targets[0]);
}

function renderDag(target) {
  mount(dag, DATA.lineage.drawings[target] || "");
}

// Tabs (one-time init per tab)
const tabs = [
  { btn: document.getElementById("tab-reaction"), panel: document.getElementById("panel-reaction"), hash: "#reaction", init: initReaction },
  { btn: document.getElementById("tab-dag"), panel: document.getElementById("panel-dag"), hash: "#dag", init: initDag },
];
const inited = new Set();

function activate(tab) {
  for (const t of tabs) {
    const on = t === tab;
    t.btn.setAttribute("aria-selected", on ? "true" : "false");
    t.panel.classList.toggle("active", on);
  }
  history.replaceState(null, "", tab.hash);
  if (!inited.has(tab.hash)) {
    try { tab.init(); } catch (e) { console.error(e); }
    inited.add(tab.hash);
  }
}

for (const t of tabs) t.btn.addEventListener("click", () => activate(t));
activate(tabs.find((t) => t.hash === location.hash) || tabs[0]);

window.addEventListener("keydown", (e) => {
  if (e.key === "/") {
    const el = document.getElementById("reactionSearch");
    if (el) { el.focus(); e.preventDefault(); }
  }
});
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
